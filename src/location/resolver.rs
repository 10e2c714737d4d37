//! Racing a location request against a deadline.
//!
//! The fallback location is built before any request is made, so a caller
//! always has something to render. A provider fix replaces it only when it
//! arrives before the timeout, and a fix landing on the synthetic offset is
//! still reported as a fallback.

use super::provider::{LocationError, LocationProvider, Position, PositionOptions};
use super::UserLocation;
use crate::core::config::{AlertMapOptions, FallbackConfig};
use crate::core::geo::LatLng;
use crate::Result;
use futures::future::FutureExt;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Requests a position, failing with [`LocationError::Timeout`] once
/// `options.timeout` elapses
pub async fn request_position<P>(
    provider: &P,
    options: &PositionOptions,
) -> std::result::Result<Position, LocationError>
where
    P: LocationProvider + ?Sized,
{
    match tokio::time::timeout(options.timeout, provider.current_position(options)).await {
        Ok(result) => result,
        Err(_) => Err(LocationError::Timeout(options.timeout)),
    }
}

/// Resolves the user location with the given options
pub async fn resolve_user_location<P>(
    provider: &P,
    accident: LatLng,
    options: &AlertMapOptions,
) -> UserLocation
where
    P: LocationProvider + ?Sized,
{
    LocationResolver::from_options(options)
        .resolve(provider, accident)
        .await
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationResolver {
    pub fallback: FallbackConfig,
    pub request: PositionOptions,
}

impl LocationResolver {
    pub fn from_options(options: &AlertMapOptions) -> Self {
        Self {
            fallback: options.fallback.clone(),
            request: PositionOptions::from(&options.geolocation),
        }
    }

    /// One deadline-bound request, with failures lifted into [`crate::MapError`]
    pub async fn locate<P>(&self, provider: &P) -> Result<Position>
    where
        P: LocationProvider + ?Sized,
    {
        Ok(request_position(provider, &self.request).await?)
    }

    pub async fn resolve<P>(&self, provider: &P, accident: LatLng) -> UserLocation
    where
        P: LocationProvider + ?Sized,
    {
        let fallback = UserLocation::fallback_for(&accident, &self.fallback);

        match self.locate(provider).await {
            Ok(fix) => {
                log::info!("user located at {}", fix.coords);
                UserLocation::classify(&accident, fix.coords, &self.fallback)
            }
            Err(e) => {
                log::warn!("geolocation failed, using fallback: {}", e);
                fallback
            }
        }
    }
}

/// Background location resolution for one map session.
///
/// Reading [`current`](LocationSession::current) never waits: it reports the
/// fallback until the spawned request has finished.
pub struct LocationSession {
    current: UserLocation,
    handle: Option<JoinHandle<UserLocation>>,
}

impl LocationSession {
    /// Spawns the request on the current tokio runtime
    pub fn start<P>(provider: Arc<P>, accident: LatLng, options: &AlertMapOptions) -> Self
    where
        P: LocationProvider + ?Sized + 'static,
    {
        let resolver = LocationResolver::from_options(options);
        let current = UserLocation::fallback_for(&accident, &resolver.fallback);
        let handle =
            tokio::spawn(async move { resolver.resolve(provider.as_ref(), accident).await });

        log::debug!("location session started for accident at {}", accident);
        Self {
            current,
            handle: Some(handle),
        }
    }

    /// Best location known right now
    pub fn current(&mut self) -> UserLocation {
        if let Some(handle) = self.handle.take() {
            if handle.is_finished() {
                match handle.now_or_never() {
                    Some(Ok(location)) => self.current = location,
                    Some(Err(e)) => log::warn!("location task failed: {}", e),
                    None => {}
                }
            } else {
                self.handle = Some(handle);
            }
        }
        self.current
    }

    pub fn is_pending(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Waits for the request to settle
    pub async fn resolved(mut self) -> UserLocation {
        if let Some(handle) = self.handle.take() {
            match handle.await {
                Ok(location) => self.current = location,
                Err(e) => log::warn!("location task failed: {}", e),
            }
        }
        self.current
    }

    /// Stops waiting and keeps whatever is current
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for LocationSession {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{FixedLocationProvider, UnavailableLocationProvider};
    use async_trait::async_trait;
    use std::time::Duration;

    const ACCIDENT: LatLng = LatLng {
        lat: 30.275224,
        lng: 77.989081,
    };

    struct SlowProvider {
        delay: Duration,
        coords: LatLng,
    }

    #[async_trait]
    impl LocationProvider for SlowProvider {
        async fn current_position(
            &self,
            _options: &PositionOptions,
        ) -> std::result::Result<Position, LocationError> {
            tokio::time::sleep(self.delay).await;
            Ok(Position::new(self.coords))
        }
    }

    fn short_timeout() -> AlertMapOptions {
        let mut options = AlertMapOptions::default();
        options.geolocation.timeout_ms = 50;
        options
    }

    #[tokio::test]
    async fn test_fix_replaces_fallback() {
        let user = LatLng::new(30.3, 78.0);
        let location =
            resolve_user_location(&FixedLocationProvider::new(user), ACCIDENT, &AlertMapOptions::default())
                .await;

        assert_eq!(location, UserLocation::Located(user));
    }

    #[tokio::test]
    async fn test_fix_on_synthetic_offset_is_fallback() {
        let drifted = LatLng::new(30.2653, 77.9791);
        let location = resolve_user_location(
            &FixedLocationProvider::new(drifted),
            ACCIDENT,
            &AlertMapOptions::default(),
        )
        .await;

        assert_eq!(location, UserLocation::Fallback(drifted));
    }

    #[tokio::test]
    async fn test_locate_lifts_provider_error() {
        let resolver = LocationResolver::default();
        let err = resolver.locate(&UnavailableLocationProvider).await.unwrap_err();

        assert!(matches!(err, crate::MapError::Location(_)));
    }

    #[tokio::test]
    async fn test_provider_error_keeps_fallback() {
        let location =
            resolve_user_location(&UnavailableLocationProvider, ACCIDENT, &AlertMapOptions::default())
                .await;

        assert!(location.is_fallback());
        assert!(location
            .position()
            .approx_eq(&LatLng::new(30.265224, 77.979081), 1e-9));
    }

    #[tokio::test]
    async fn test_timeout_keeps_fallback() {
        let provider = SlowProvider {
            delay: Duration::from_millis(500),
            coords: LatLng::new(30.3, 78.0),
        };
        let options = short_timeout();

        let err = request_position(&provider, &PositionOptions::from(&options.geolocation))
            .await
            .unwrap_err();
        assert_eq!(err, LocationError::Timeout(Duration::from_millis(50)));

        let location = resolve_user_location(&provider, ACCIDENT, &options).await;
        assert!(location.is_fallback());
    }

    #[tokio::test]
    async fn test_session_reports_fallback_until_resolved() {
        let user = LatLng::new(30.3, 78.0);
        let provider = Arc::new(SlowProvider {
            delay: Duration::from_millis(100),
            coords: user,
        });

        let mut session = LocationSession::start(provider, ACCIDENT, &AlertMapOptions::default());
        assert!(session.current().is_fallback());
        assert!(session.is_pending());

        assert_eq!(session.resolved().await, UserLocation::Located(user));
    }

    #[tokio::test]
    async fn test_session_current_picks_up_finished_fix() {
        let user = LatLng::new(30.3, 78.0);
        let provider = Arc::new(FixedLocationProvider::new(user));
        let mut session = LocationSession::start(provider, ACCIDENT, &AlertMapOptions::default());

        for _ in 0..100 {
            if !session.is_pending() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        assert_eq!(session.current(), UserLocation::Located(user));
    }

    #[tokio::test]
    async fn test_cancelled_session_keeps_fallback() {
        let provider = Arc::new(SlowProvider {
            delay: Duration::from_millis(500),
            coords: LatLng::new(30.3, 78.0),
        });
        let mut session = LocationSession::start(provider, ACCIDENT, &AlertMapOptions::default());

        session.cancel();
        assert!(!session.is_pending());
        assert!(session.resolved().await.is_fallback());
    }
}
