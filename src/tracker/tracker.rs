use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::error::TrackerError;
use crate::catalog::{parse_tle_lines, CatalogEntry, TleLoader};
use crate::observer::ObserverLocation;
use crate::propagation::{GmstClock, Sgp4Propagator};
use crate::registry::{Identity, ObjectView, Registry};

pub type SkyRegistry = Registry<Sgp4Propagator, GmstClock>;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct TrackerStatus {
    pub running: bool,
    pub observer: ObserverLocation,
    pub last_tick: Option<DateTime<Utc>>,
    pub tracked: usize,
    pub visible: usize,
    pub best: Option<ObjectView>,
}

struct Shared {
    observer: ObserverLocation,
    registry: SkyRegistry,
    last_tick: Option<DateTime<Utc>>,
}

impl Shared {
    fn tick(&mut self, now: DateTime<Utc>) {
        self.registry.update_all(&self.observer, now);
        self.last_tick = Some(now);
    }
}

struct WorkerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

/// Drives the registry against wall-clock time. Every tick and every read
/// goes through one mutex, so readers never observe a half-updated catalog.
pub struct Tracker {
    shared: Arc<StdMutex<Shared>>,
    worker: Option<WorkerHandle>,
}

impl Tracker {
    pub fn new(observer: ObserverLocation, registry: SkyRegistry) -> Self {
        Self {
            shared: Arc::new(StdMutex::new(Shared {
                observer,
                registry,
                last_tick: None,
            })),
            worker: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Runs one synchronous tick at `now`.
    pub fn tick(&self, now: DateTime<Utc>) {
        lock(&self.shared).tick(now);
    }

    pub fn start(&mut self, tick_interval: Duration) -> Result<(), TrackerError> {
        if self.worker.is_some() {
            return Err(TrackerError::AlreadyRunning);
        }

        let shared = self.shared.clone();
        let (stop_tx, stop_rx) = oneshot::channel();
        let join = tokio::spawn(run_tick_loop(shared, tick_interval, stop_rx));
        self.worker = Some(WorkerHandle { stop_tx, join });

        log::info!("Tracker started, ticking every {:?}", tick_interval);
        Ok(())
    }

    pub async fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            let _ = worker.join.await;
            log::info!("Tracker stopped");
        }
    }

    /// New location, used from the next tick on.
    pub fn set_observer(
        &self,
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_m: f64,
    ) -> Result<ObserverLocation, TrackerError> {
        let mut locked = lock(&self.shared);
        locked.observer.set(latitude_deg, longitude_deg, altitude_m)?;
        log::info!(
            "Observer set to {:.4}, {:.4} at {:.0} m",
            locked.observer.latitude_deg(),
            locked.observer.longitude_deg(),
            locked.observer.altitude_m()
        );
        Ok(locked.observer)
    }

    pub fn observer(&self) -> ObserverLocation {
        lock(&self.shared).observer
    }

    pub fn status(&self) -> TrackerStatus {
        let locked = lock(&self.shared);
        TrackerStatus {
            running: self.worker.is_some(),
            observer: locked.observer,
            last_tick: locked.last_tick,
            tracked: locked.registry.len(),
            visible: locked.registry.visible_count(),
            best: locked.registry.best().map(|o| o.view()),
        }
    }

    /// Visible objects, strongest signal first.
    pub fn visible(&self) -> Vec<ObjectView> {
        let locked = lock(&self.shared);
        locked
            .registry
            .visible_sorted()
            .into_iter()
            .map(|o| o.view())
            .collect()
    }

    pub fn best(&self) -> Option<ObjectView> {
        lock(&self.shared).registry.best().map(|o| o.view())
    }

    /// Every tracked object in catalog order.
    pub fn objects(&self) -> Vec<ObjectView> {
        lock(&self.shared)
            .registry
            .objects()
            .iter()
            .map(|o| o.view())
            .collect()
    }

    /// Parses one element set and registers it. If the tracker has ticked
    /// before, the new object is brought up to the last tick right away.
    pub fn add_tle(&self, tle: &str) -> Result<ObjectView, TrackerError> {
        let entry = CatalogEntry::from_record(parse_tle_lines(tle)?, "request")?;
        let identity = Identity::new(entry.name, Some(entry.catalog_number));

        let mut locked = lock(&self.shared);
        let index = locked.registry.add(identity.clone(), entry.elements);
        if let Some(at) = locked.last_tick {
            let observer = locked.observer.position_earth_fixed();
            locked.registry.update_one(&identity, observer, at);
        }
        log::info!(
            "Added {} (NORAD {}) to catalog",
            identity.name,
            entry.catalog_number
        );

        Ok(locked.registry.objects()[index].view())
    }

    /// Replaces the catalog with the contents of the TLE folder. On a load
    /// failure the current catalog is kept.
    pub fn reload_catalog(&self, loader: &TleLoader) -> Result<usize, TrackerError> {
        let entries = loader.load_all()?;
        Ok(self.install_catalog(entries))
    }

    /// Replaces the catalog with already loaded entries and brings them up
    /// to the last tick. Returns the number of tracked objects.
    pub fn install_catalog(&self, entries: Vec<CatalogEntry>) -> usize {
        let mut locked = lock(&self.shared);
        locked.registry.replace_catalog(
            entries
                .into_iter()
                .map(|e| (Identity::new(e.name, Some(e.catalog_number)), e.elements)),
        );
        if let Some(at) = locked.last_tick {
            locked.tick(at);
        }
        locked.registry.len()
    }
}

fn lock(shared: &StdMutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn run_tick_loop(
    shared: Arc<StdMutex<Shared>>,
    tick_interval: Duration,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let should_stop = tokio::select! {
            _ = interval.tick() => false,
            _ = &mut stop_rx => true,
        };
        if should_stop {
            return;
        }

        lock(&shared).tick(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;
    use crate::registry::ObjectState;
    use chrono::TimeZone;

    fn tracker_with_iss() -> Tracker {
        let tracker = Tracker::new(
            ObserverLocation::new(52.52, 13.405, 34.0).unwrap(),
            Registry::new(Sgp4Propagator, GmstClock),
        );
        tracker.add_tle(fixtures::ISS).unwrap();
        tracker
    }

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 7, 13, 0, 0, 0).unwrap()
    }

    #[test]
    fn tick_updates_snapshot() {
        let tracker = tracker_with_iss();
        let before = tracker.objects();
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].state, ObjectState::Uninitialized);
        assert_eq!(before[0].catalog_number, Some(25544));

        tracker.tick(epoch());

        let status = tracker.status();
        assert_eq!(status.last_tick, Some(epoch()));
        assert_eq!(status.tracked, 1);
        assert!(!status.running);

        let iss = &tracker.objects()[0];
        assert_ne!(iss.state, ObjectState::Uninitialized);
        assert_eq!(iss.last_update, Some(epoch()));
        let fix = iss.topocentric.unwrap();
        assert!((0.0..360.0).contains(&fix.azimuth_deg));
        assert!(fix.range_km > 300.0);
        assert_eq!(status.visible, tracker.visible().len());
        assert_eq!(iss.is_active, tracker.best().is_some());
    }

    #[test]
    fn set_observer_normalizes_and_rejects_garbage() {
        let tracker = tracker_with_iss();
        let observer = tracker.set_observer(95.0, 190.0, -10.0).unwrap();
        assert_eq!(observer.latitude_deg(), 90.0);
        assert!((observer.longitude_deg() + 170.0).abs() < 1e-9);
        assert_eq!(observer.altitude_m(), 0.0);

        assert!(matches!(
            tracker.set_observer(f64::NAN, 0.0, 0.0),
            Err(TrackerError::Observer(_))
        ));
        assert_eq!(tracker.observer(), observer);
    }

    #[test]
    fn add_tle_rejects_malformed_sets() {
        let tracker = tracker_with_iss();
        assert!(matches!(
            tracker.add_tle("not a tle"),
            Err(TrackerError::Catalog(_))
        ));
        let broken = fixtures::ISS.replace("51.6461", "5x.6461");
        assert!(tracker.add_tle(&broken).is_err());
        assert_eq!(tracker.objects().len(), 1);
    }

    #[test]
    fn add_after_tick_is_updated_immediately() {
        let tracker = Tracker::new(
            ObserverLocation::default(),
            Registry::new(Sgp4Propagator, GmstClock),
        );
        tracker.tick(epoch());
        let view = tracker.add_tle(fixtures::ISS).unwrap();
        assert_eq!(view.last_update, Some(epoch()));
        assert!(view.topocentric.is_some());
    }

    #[test]
    fn objects_sharing_a_name_are_tracked_separately() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = format!(
            "{}\n{}",
            fixtures::ISS.replace("ISS (ZARYA)", "DEB"),
            fixtures::HST.replace("HST", "DEB")
        );
        std::fs::write(dir.path().join("debris.tle"), catalog).unwrap();

        let tracker = Tracker::new(
            ObserverLocation::default(),
            Registry::new(Sgp4Propagator, GmstClock),
        );
        let loaded = tracker
            .reload_catalog(&TleLoader::new(dir.path().to_path_buf()))
            .unwrap();
        assert_eq!(loaded, 2);

        let numbers: Vec<_> = tracker
            .objects()
            .iter()
            .map(|o| o.catalog_number)
            .collect();
        assert_eq!(numbers, vec![Some(25544), Some(20580)]);
    }

    #[test]
    fn reload_from_missing_folder_keeps_catalog() {
        let tracker = tracker_with_iss();
        let loader = TleLoader::new("/nonexistent/skywatch".into());
        assert!(tracker.reload_catalog(&loader).is_err());
        assert_eq!(tracker.objects().len(), 1);
    }

    #[tokio::test]
    async fn worker_ticks_until_stopped() {
        let mut tracker = tracker_with_iss();
        tracker.start(Duration::from_millis(10)).unwrap();
        assert!(matches!(
            tracker.start(Duration::from_millis(10)),
            Err(TrackerError::AlreadyRunning)
        ));
        assert!(tracker.status().running);

        tokio::time::sleep(Duration::from_millis(60)).await;
        tracker.stop().await;

        let status = tracker.status();
        assert!(!status.running);
        assert!(status.last_tick.is_some());
        assert!(tracker.start(Duration::from_millis(10)).is_ok());
        tracker.stop().await;
    }
}
