// SPDX-License-Identifier: MIT

//! Interval-driven location simulation for one campaign
//!
//! Replaces a blocking refresh loop with a background task that can be
//! stopped at any time through its [`TrackingHandle`].

use serde::Serialize;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::jitter::{random_offset, DEFAULT_JITTER};
use crate::hub::model::CampaignStatus;
use crate::hub::{Result, Session};
use crate::market::views::RiderPoint;

const SNAPSHOT_BUFFER: usize = 64;

/// How a tracker runs
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Delay between location steps
    pub interval: Duration,
    /// Maximum offset per step, in degrees
    pub jitter: f64,
    /// Stop by itself after this many steps
    pub max_ticks: Option<u64>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            jitter: DEFAULT_JITTER,
            max_ticks: None,
        }
    }
}

/// One round of positions for a tracked campaign
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationSnapshot {
    pub campaign: String,
    pub tick: u64,
    pub points: Vec<RiderPoint>,
}

/// Why a tracker task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrackerExit {
    Stopped,
    MaxTicks,
    CampaignCompleted,
    CampaignMissing,
}

/// Control side of a running tracker
///
/// Only the task owns the sending half of the snapshot channel, so every
/// subscriber sees the channel close once the task ends.
pub struct TrackingHandle {
    campaign: String,
    cancel: CancellationToken,
    snapshots: broadcast::Receiver<LocationSnapshot>,
    task: JoinHandle<TrackerExit>,
}

impl TrackingHandle {
    pub fn campaign(&self) -> &str {
        &self.campaign
    }

    /// Receive snapshots produced from now on
    pub fn subscribe(&self) -> broadcast::Receiver<LocationSnapshot> {
        self.snapshots.resubscribe()
    }

    /// Ask the task to stop; it exits before its next step
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the task to end
    pub async fn join(self) -> TrackerExit {
        // A panicked or aborted task counts as stopped
        self.task.await.unwrap_or(TrackerExit::Stopped)
    }
}

pub struct LiveTracker;

impl LiveTracker {
    /// Spawn a tracker for `campaign` on the current runtime
    pub fn start(session: Session, campaign: &str, config: TrackerConfig) -> TrackingHandle {
        let cancel = CancellationToken::new();
        let (sender, snapshots) = broadcast::channel(SNAPSHOT_BUFFER);

        let task = tokio::spawn(run(
            session,
            campaign.to_string(),
            config,
            cancel.clone(),
            sender,
        ));

        TrackingHandle {
            campaign: campaign.to_string(),
            cancel,
            snapshots,
            task,
        }
    }
}

async fn run(
    session: Session,
    campaign: String,
    config: TrackerConfig,
    cancel: CancellationToken,
    snapshots: broadcast::Sender<LocationSnapshot>,
) -> TrackerExit {
    log::info!(
        "Tracking '{}' every {:?} (max ticks: {:?})",
        campaign,
        config.interval,
        config.max_ticks
    );

    let mut interval = tokio::time::interval(config.interval);
    let mut tick = 0u64;

    let exit = loop {
        if config.max_ticks.is_some_and(|max| tick >= max) {
            break TrackerExit::MaxTicks;
        }

        tokio::select! {
            _ = cancel.cancelled() => break TrackerExit::Stopped,
            _ = interval.tick() => {
                tick += 1;
                match step(&session, &campaign, config.jitter, tick).await {
                    Ok(Some(snapshot)) => {
                        // No subscribers is fine; positions still move
                        let _ = snapshots.send(snapshot);
                    }
                    Ok(None) => break TrackerExit::CampaignCompleted,
                    Err(e) => {
                        log::warn!("Tracker for '{}' ended: {}", campaign, e);
                        break TrackerExit::CampaignMissing;
                    }
                }
            }
        }
    };

    log::info!("Tracking '{}' finished after {} ticks: {:?}", campaign, tick, exit);
    exit
}

/// Move every rider on the campaign once and report where they are
async fn step(
    session: &Session,
    campaign: &str,
    jitter: f64,
    tick: u64,
) -> Result<Option<LocationSnapshot>> {
    let mut store = session.write().await;

    let title = {
        let tracked = store.campaign(campaign)?;
        if tracked.status == CampaignStatus::Completed {
            return Ok(None);
        }
        tracked.title.clone()
    };

    let names: Vec<String> = store
        .riders_on_campaign(&title)?
        .into_iter()
        .map(|r| r.name.clone())
        .collect();

    let mut points = Vec::with_capacity(names.len());
    for name in names {
        let (dlat, dlon) = random_offset(jitter);
        let rider = store.nudge_rider(&name, dlat, dlon)?;
        points.push(RiderPoint::from_rider(rider));
    }

    Ok(Some(LocationSnapshot {
        campaign: title,
        tick,
        points,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::model::NewCampaign;
    use crate::market::seed::DEFAULT_SEED;

    fn fast(max_ticks: Option<u64>) -> TrackerConfig {
        TrackerConfig {
            interval: Duration::from_millis(5),
            jitter: DEFAULT_JITTER,
            max_ticks,
        }
    }

    async fn invited_session() -> Session {
        let session = Session::new(DEFAULT_SEED.build_store());
        session
            .create_campaign(NewCampaign::new("Sale", "x"))
            .await
            .unwrap();
        session.invite_riders("Sale").await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_stops_after_max_ticks() {
        let session = invited_session().await;
        let handle = LiveTracker::start(session.clone(), "Sale", fast(Some(3)));
        let mut rx = handle.subscribe();

        let exit = handle.join().await;
        assert_eq!(exit, TrackerExit::MaxTicks);

        let mut ticks = Vec::new();
        while let Ok(snapshot) = rx.try_recv() {
            assert_eq!(snapshot.points.len(), 2);
            ticks.push(snapshot.tick);
        }
        // The first tick can fire before the subscription exists
        assert!(ticks.ends_with(&[3]));
    }

    #[tokio::test]
    async fn test_zero_max_ticks_exits_without_moving() {
        let session = invited_session().await;
        let before = session.read().await.rider("Ravi").unwrap().location;

        let handle = LiveTracker::start(session.clone(), "Sale", fast(Some(0)));
        let mut rx = handle.subscribe();
        assert_eq!(handle.join().await, TrackerExit::MaxTicks);

        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Closed)
        ));
        let after = session.read().await.rider("Ravi").unwrap().location;
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_subscribers_see_close_when_task_ends() {
        let session = invited_session().await;
        let handle = LiveTracker::start(session, "Sale", fast(Some(2)));
        let mut rx = handle.subscribe();

        let mut received = 0;
        loop {
            match tokio::time::timeout(Duration::from_secs(5), rx.recv()).await {
                Ok(Ok(_)) => received += 1,
                Ok(Err(broadcast::error::RecvError::Closed)) => break,
                other => panic!("unexpected receive result: {:?}", other),
            }
        }
        assert_eq!(received, 2);
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn test_stop_cancels_task() {
        let session = invited_session().await;
        let handle = LiveTracker::start(session, "Sale", fast(None));

        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.stop();

        assert_eq!(handle.join().await, TrackerExit::Stopped);
    }

    #[tokio::test]
    async fn test_moves_riders_within_jitter() {
        let session = invited_session().await;
        let before = session.read().await.rider("Ravi").unwrap().location;

        let handle = LiveTracker::start(session.clone(), "Sale", fast(Some(1)));
        assert_eq!(handle.join().await, TrackerExit::MaxTicks);

        let after = session.read().await.rider("Ravi").unwrap().location;
        assert!((after.lat - before.lat).abs() <= DEFAULT_JITTER + 1e-9);
        assert!((after.lon - before.lon).abs() <= DEFAULT_JITTER + 1e-9);

        // Zara is not on the campaign and stays put
        let zara = session.read().await.rider("Zara").unwrap().location;
        assert_eq!(zara.lat, 18.52);
    }

    #[tokio::test]
    async fn test_ends_when_campaign_completes() {
        let session = invited_session().await;
        session.accept_campaign("Ravi", "Sale").await.unwrap();
        session.complete_campaign("Sale", "Ravi").await.unwrap();

        let handle = LiveTracker::start(session, "Sale", fast(None));
        assert_eq!(handle.join().await, TrackerExit::CampaignCompleted);
    }

    #[tokio::test]
    async fn test_ends_for_unknown_campaign() {
        let session = Session::new(DEFAULT_SEED.build_store());
        let handle = LiveTracker::start(session, "Nope", fast(None));
        assert_eq!(handle.join().await, TrackerExit::CampaignMissing);
    }
}
