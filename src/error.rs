use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Terminal is {columns}x{rows}; the viewer needs at least {min_columns}x{min_rows}")]
    TooSmall {
        columns: u16,
        rows: u16,
        min_columns: u16,
        min_rows: u16,
    },

    #[error("Invalid size '{0}', expected COLSxROWS such as 120x40")]
    InvalidSize(String),
}
