use rand::{
    Rng,
    distributions::{Distribution, WeightedIndex},
};
use tracing::{info, warn};

use crate::{
    error::RegistryError,
    models::{DrawRecord, Prize},
    store::Store,
    utils::{normalize_national_id, timestamp},
};

pub const DEFAULT_PRIZE: &str = "Prêmio Padrão";

#[derive(Debug, Clone, PartialEq)]
pub struct DrawOutcome {
    pub record: DrawRecord,
    /// Set when the CPF had already been drawn and the stored result is returned.
    pub repeat: bool,
}

/// Weighted pick over the catalog. Falls back to `default_prize` when the
/// catalog is empty or its weights do not form a distribution.
pub fn pick_prize<R: Rng + ?Sized>(prizes: &[Prize], rng: &mut R, default_prize: &str) -> String {
    if prizes.is_empty() {
        return default_prize.to_string();
    }

    // WeightedIndex panics rather than erroring when the total overflows
    let total: f64 = prizes.iter().map(|prize| prize.chance).sum();
    if !total.is_finite() || prizes.iter().any(|prize| !prize.chance.is_finite()) {
        warn!("Prize weights do not add up to a finite total, awarding default prize");
        return default_prize.to_string();
    }

    match WeightedIndex::<f64>::new(prizes.iter().map(|prize| prize.chance)) {
        Ok(index) => prizes[index.sample(rng)].name.clone(),
        Err(e) => {
            warn!("Unusable prize weights ({e}), awarding default prize");
            default_prize.to_string()
        }
    }
}

/// Eligibility check plus draw. A CPF is drawn once; later calls return the
/// stored record and write nothing.
pub fn draw_for<R: Rng + ?Sized>(
    store: &Store,
    raw_id: &str,
    rng: &mut R,
    default_prize: &str,
) -> Result<DrawOutcome, RegistryError> {
    let national_id = normalize_national_id(raw_id)?;

    let participants = store.participants();
    let registered_by = match participants
        .iter()
        .find(|participant| participant.national_id == national_id)
    {
        Some(participant) => participant.registered_by.clone(),
        None if participants.unreadable_has("cpf", &national_id) => "N/A".to_string(),
        None => return Err(RegistryError::NotEligible),
    };

    let mut draws = store.draws();
    if let Some(existing) = draws.iter().find(|draw| draw.national_id == national_id) {
        info!("CPF {national_id} already drawn, returning stored result");

        return Ok(DrawOutcome {
            record: existing.clone(),
            repeat: true,
        });
    }

    if draws.unreadable_has("cpf", &national_id) {
        warn!("CPF {national_id} has an unreadable draw record, refusing to draw again");
        return Err(RegistryError::UnreadableRecord);
    }

    let record = DrawRecord {
        national_id,
        prize: pick_prize(&store.prizes(), rng, default_prize),
        drawn_at: timestamp(),
        registered_by,
        extra: Default::default(),
    };

    draws.push(record.clone());
    store.save_draws(&draws)?;

    info!("CPF {} drew {}", record.national_id, record.prize);

    Ok(DrawOutcome {
        record,
        repeat: false,
    })
}
