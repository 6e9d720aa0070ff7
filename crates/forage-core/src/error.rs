/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building or loading a landscape.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The grid dimensions are zero or do not match the number of cells.
    #[error("invalid landscape shape: {width}x{height} grid with {cells} cells")]
    InvalidShape {
        /// Declared grid width.
        width: usize,
        /// Declared grid height.
        height: usize,
        /// Number of quality values supplied.
        cells: usize,
    },

    /// A cell quality is negative, NaN, or infinite.
    #[error("invalid quality {value} at cell ({x}, {y})")]
    InvalidQuality {
        /// Column of the offending cell.
        x: usize,
        /// Row of the offending cell.
        y: usize,
        /// The rejected value.
        value: f64,
    },

    /// The landscape JSON could not be parsed.
    #[error("landscape json: {0}")]
    Json(#[from] serde_json::Error),
}
