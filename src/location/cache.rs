use super::provider::{LocationError, LocationProvider, Position, PositionOptions};
use async_trait::async_trait;
use std::sync::Mutex;

/// Reuses the last fix while it is younger than `PositionOptions::maximum_age`
pub struct CachedLocationProvider<P> {
    inner: P,
    last_fix: Mutex<Option<Position>>,
}

impl<P: LocationProvider> CachedLocationProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            last_fix: Mutex::new(None),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Last fix if it is still fresh enough for `options`
    pub fn cached(&self, options: &PositionOptions) -> Option<Position> {
        let guard = self.last_fix.lock().ok()?;
        (*guard).filter(|fix| fix.age() < options.maximum_age)
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.last_fix.lock() {
            *guard = None;
        }
    }
}

#[async_trait]
impl<P: LocationProvider> LocationProvider for CachedLocationProvider<P> {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> std::result::Result<Position, LocationError> {
        if let Some(fix) = self.cached(options) {
            log::debug!("reusing cached fix ({:?} old)", fix.age());
            return Ok(fix);
        }

        let fix = self.inner.current_position(options).await?;
        if let Ok(mut guard) = self.last_fix.lock() {
            *guard = Some(fix);
        }
        Ok(fix)
    }
}
