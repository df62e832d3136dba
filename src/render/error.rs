use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
