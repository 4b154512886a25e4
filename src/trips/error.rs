//! Enrollment errors

use crate::repositories::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum EnrollmentError {
    #[error("Client is already assigned to this trip")]
    DuplicateEnrollment,

    #[error("Trip with id:{0} does not exist")]
    TripNotFound(i32),

    #[error(transparent)]
    Storage(#[from] StoreError),
}
