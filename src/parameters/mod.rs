//! Parameter management
//!
//! Turn sensor settings are exposed as named parameters so a host can tune
//! them at runtime and persist a measured bias. Flash persistence itself is
//! the caller's concern; the store only tracks whether it is dirty.

pub mod error;
pub mod storage;
pub mod turn;

pub use error::ParameterError;
pub use storage::{ParamFlags, ParamMetadata, ParamValue, ParameterStore};
pub use storage::{MAX_PARAMS, PARAM_NAME_LEN};
pub use turn::{TurnSensorConfig, TurnSensorParams};
