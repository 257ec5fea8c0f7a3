use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Config directory not found. Overcast looks in this order:\n\
        - the OVERCAST_DIR environment variable\n\
        - a .overcast directory in the current directory or any parent\n\
        - ~/.overcast"
    )]
    ConfigDirNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
