use tracing::info;

use crate::{
    error::RegistryError,
    models::Participant,
    store::Store,
    utils::{normalize_national_id, timestamp},
};

/// Authorizes a CPF for the draw on behalf of `staff`.
pub fn register_participant(
    store: &Store,
    raw_id: &str,
    staff: &str,
) -> Result<Participant, RegistryError> {
    let national_id = normalize_national_id(raw_id)?;

    let mut participants = store.participants();
    if participants
        .iter()
        .any(|participant| participant.national_id == national_id)
        || participants.unreadable_has("cpf", &national_id)
    {
        return Err(RegistryError::DuplicateParticipant);
    }

    let participant = Participant {
        national_id,
        registered_by: staff.to_string(),
        registered_at: timestamp(),
        extra: Default::default(),
    };

    participants.push(participant.clone());
    store.save_participants(&participants)?;

    info!(
        "{staff} authorized CPF {} for the draw",
        participant.national_id
    );

    Ok(participant)
}
