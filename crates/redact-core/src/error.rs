use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Run index {index} out of range for paragraph with {len} runs")]
    RunOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
