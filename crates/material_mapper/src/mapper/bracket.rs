//! Begin/end scene bookkeeping shared by the mappers

use super::error::{MapperError, MapperResult};

/// Tracks whether the mapper is inside a scene and still usable
#[derive(Debug, Default)]
pub(crate) struct SceneBracket {
    active: bool,
    disposed: bool,
}

impl SceneBracket {
    pub(crate) fn begin(&mut self) -> MapperResult<()> {
        self.ensure_live()?;
        if self.active {
            return Err(rejected(MapperError::SceneAlreadyActive));
        }
        self.active = true;
        Ok(())
    }

    pub(crate) fn end(&mut self) -> MapperResult<()> {
        self.require_active()?;
        self.active = false;
        Ok(())
    }

    pub(crate) fn require_active(&self) -> MapperResult<()> {
        self.ensure_live()?;
        if self.active {
            Ok(())
        } else {
            Err(rejected(MapperError::NoActiveScene))
        }
    }

    pub(crate) fn dispose(&mut self) {
        self.active = false;
        self.disposed = true;
    }

    pub(crate) const fn is_active(&self) -> bool {
        self.active
    }

    fn ensure_live(&self) -> MapperResult<()> {
        if self.disposed {
            Err(rejected(MapperError::Disposed))
        } else {
            Ok(())
        }
    }
}

fn rejected(error: MapperError) -> MapperError {
    log::warn!("Rejected mapper call: {}", error);
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_sequence() {
        let mut bracket = SceneBracket::default();
        assert!(matches!(bracket.require_active(), Err(MapperError::NoActiveScene)));
        assert!(matches!(bracket.end(), Err(MapperError::NoActiveScene)));

        bracket.begin().unwrap();
        assert!(bracket.is_active());
        assert!(matches!(bracket.begin(), Err(MapperError::SceneAlreadyActive)));
        bracket.end().unwrap();
        assert!(!bracket.is_active());
    }

    #[test]
    fn test_disposed_rejects_everything() {
        let mut bracket = SceneBracket::default();
        bracket.begin().unwrap();
        bracket.dispose();
        assert!(matches!(bracket.begin(), Err(MapperError::Disposed)));
        assert!(matches!(bracket.end(), Err(MapperError::Disposed)));
        assert!(matches!(bracket.require_active(), Err(MapperError::Disposed)));
    }
}
