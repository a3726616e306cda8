use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use crate::level::Level;
use crate::LoadLevel;

impl LoadLevel for str {
    fn load_level(&self) -> Result<Level, Box<dyn Error>> {
        let level = read_file(self)?;
        Ok(level.parse()?)
    }
}

pub(crate) fn read_file<P: AsRef<Path>>(path: P) -> Result<String, Box<dyn Error>> {
    let mut file = File::open(path)?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading() {
        let level = "levels/custom/01-simplest.txt".load_level().unwrap();
        assert_eq!(level.to_string(), "#####\n#@$.#\n#####\n");
    }

    #[test]
    fn missing_file() {
        assert!("levels/custom/does-not-exist.txt".load_level().is_err());
    }

    #[test]
    fn parse_error_is_reported() {
        let err = "Cargo.toml".load_level().unwrap_err();
        assert!(err.to_string().starts_with("Invalid cell at pos"));
    }
}
