use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardFetchError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Unexpected status: {0}")]
    Status(u16),
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("ClientError: {0}")]
    Client(String),
}
