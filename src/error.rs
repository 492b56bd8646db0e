use thiserror::Error;
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("{0} needs to be called between begin_plot and end_plot")]
    NoCurrentPlot(&'static str),
    #[error("begin_plot called while another plot is open")]
    NestedPlot,
    #[error("setup needs to be called after begin_plot and before any setup locking functions")]
    SetupLocked,
    #[error("tried to pop {requested} style entries but only {available} were pushed")]
    StyleStackUnderflow { requested: usize, available: usize },
    #[error("tried to pop {requested} colormaps but only {available} were pushed")]
    ColormapStackUnderflow { requested: usize, available: usize },
    #[error("style variable {0} does not hold that kind of value")]
    StyleVarType(&'static str),
    #[error("colormap {0:?} is already registered")]
    DuplicateColormap(String),
    #[error("a colormap needs more than one color, got {0}")]
    ColormapTooSmall(usize),
    #[error("no colormap named {0:?}")]
    UnknownColormap(String),
    #[error("colormap index {0} out of range")]
    ColormapIndex(usize),
    #[error("no item is being plotted")]
    NoCurrentItem,
    #[error("data length mismatch: expected {expected}, got {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },
    #[error("data length {len} must be a multiple of {multiple}")]
    NotMultipleOf { len: usize, multiple: usize },
    #[error("scale factors must be positive")]
    InvalidBoxScale,
}
pub type Result<T> = std::result::Result<T, Error>;
