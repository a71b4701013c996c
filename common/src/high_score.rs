use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Parse(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Parse(content) => write!(f, "Invalid high score value: {:?}", content),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Where the player's best score lives between sessions.
pub trait HighScoreStore: Send {
    fn load(&self) -> Result<u32, StoreError>;
    fn save(&self, score: u32) -> Result<(), StoreError>;
}

#[derive(Default)]
pub struct InMemoryHighScoreStore {
    value: Mutex<u32>,
}

impl InMemoryHighScoreStore {
    pub fn new(initial: u32) -> Self {
        Self {
            value: Mutex::new(initial),
        }
    }
}

impl HighScoreStore for InMemoryHighScoreStore {
    fn load(&self) -> Result<u32, StoreError> {
        Ok(*self.value.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }

    fn save(&self, score: u32) -> Result<(), StoreError> {
        *self.value.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = score;
        Ok(())
    }
}

/// Plain decimal text file. A missing file reads as zero.
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> Result<u32, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let trimmed = content.trim();
                trimmed
                    .parse::<u32>()
                    .map_err(|_| StoreError::Parse(trimmed.to_string()))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(0),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, score: u32) -> Result<(), StoreError> {
        std::fs::write(&self.path, score.to_string())?;
        Ok(())
    }
}
