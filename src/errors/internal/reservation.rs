use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReservationError {
    #[error("Reservation not found: {0}")]
    NotFound(i64),

    #[error("Cannot {action} reservation {id} in status {from}")]
    InvalidTransition {
        id: i64,
        from: String,
        action: String,
    },
}

impl ReservationError {
    pub fn invalid_transition(id: i64, from: &str, action: &str) -> Self {
        Self::InvalidTransition {
            id,
            from: from.to_string(),
            action: action.to_string(),
        }
    }
}
