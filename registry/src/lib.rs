//! # Registry
//!
//! Flat record stores behind the prize draw.
//!
//! ## Files
//!
//! Four JSON arrays inside one data directory, read and rewritten whole:
//! - `usuarios.json`: staff accounts (**username**, **password**, **role**)
//! - `premios.json`: prize catalog (**nome**, **chance**), maintained by hand
//! - `filiados.json`: eligible CPFs (**cpf**, **cadastrado_por**, **data_cadastro**)
//! - `sorteios.json`: draw results (**cpf**, **premio**, **data_sorteio**, **atendente_cadastro**)
//!
//! Field names on disk stay as deployed so existing data keeps loading.
//!
//!
//!
//! ## Draw
//!
//! 1. Strip everything but digits from the CPF, require 11 of them.
//! 2. CPF must be in the eligible list.
//! 3. Already drawn, hand back the stored result untouched.
//! 4. Otherwise pick a prize weighted by `chance`, stamp it, append, save.
//!
//! A CPF gets exactly one draw record, ever.
//!
//!
//!
//! ## Notes
//! - Missing or corrupt files read as empty lists.
//! - A row that does not fit its record type is skipped with a warning but kept verbatim,
//!   and written back on the next save. Its key still counts for duplicates and draws.
//! - Only ASCII `0-9` count as CPF digits. Other Unicode digits are stripped like any
//!   other character, unlike a Unicode-aware `\D`.
//! - Nothing here locks. Callers sharing a data directory serialize their own writes.

pub mod accounts;
pub mod draw;
pub mod error;
pub mod models;
pub mod participants;
pub mod store;
pub mod utils;

pub use accounts::{authenticate, register_user, verify_credentials};
pub use draw::{DEFAULT_PRIZE, DrawOutcome, draw_for, pick_prize};
pub use error::{RegistryError, StoreError};
pub use models::{DrawRecord, Participant, Prize, Role, User};
pub use participants::register_participant;
pub use store::{Records, Store};
pub use utils::{normalize_national_id, timestamp};
