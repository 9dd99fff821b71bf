// SPDX-License-Identifier: MIT

//! Rider dashboard: log in, accept invitations, share location, finish

use super::projection::{CampaignCard, RiderPoint, RiderProfile};
use crate::hub::model::Coordinates;
use crate::hub::{HubError, Result, Session};
use crate::market::tracking::random_offset;

/// Stateless rider view over a session
pub struct RiderView<'a> {
    session: &'a Session,
    jitter: f64,
}

impl<'a> RiderView<'a> {
    pub fn new(session: &'a Session, jitter: f64) -> Self {
        Self { session, jitter }
    }

    /// Name-only login; unknown names are `NotFound`
    pub async fn login(&self, name: &str) -> Result<RiderProfile> {
        let store = self.session.read().await;
        let rider = store.rider(name)?;
        Ok(RiderProfile::build(&store, rider))
    }

    /// Invitations the rider can still accept
    pub async fn pending_campaigns(&self, name: &str) -> Result<Vec<CampaignCard>> {
        let store = self.session.read().await;
        Ok(store
            .campaigns_for_rider(name)?
            .into_iter()
            .map(|c| CampaignCard::build(&store, c))
            .collect())
    }

    pub async fn active_campaign(&self, name: &str) -> Result<Option<CampaignCard>> {
        let store = self.session.read().await;
        Ok(store
            .active_campaign(name)?
            .map(|c| CampaignCard::build(&store, c)))
    }

    /// "Accept"
    pub async fn accept(&self, name: &str, title: &str) -> Result<CampaignCard> {
        let mut store = self.session.write().await;
        let campaign = store.accept_campaign(name, title)?.clone();
        Ok(CampaignCard::build(&store, &campaign))
    }

    /// "Mark as Complete" for the rider's active campaign
    pub async fn complete(&self, name: &str) -> Result<CampaignCard> {
        let mut store = self.session.write().await;
        let title = store
            .active_campaign(name)?
            .map(|c| c.title.clone())
            .ok_or_else(|| no_active_campaign(name))?;

        let campaign = store.complete_campaign(&title, name)?.clone();
        Ok(CampaignCard::build(&store, &campaign))
    }

    /// "Share Live Location": one jitter step while on a campaign
    pub async fn share_location(&self, name: &str) -> Result<RiderPoint> {
        let mut store = self.session.write().await;
        if store.active_campaign(name)?.is_none() {
            return Err(no_active_campaign(name));
        }

        let (dlat, dlon) = random_offset(self.jitter);
        let rider = store.nudge_rider(name, dlat, dlon)?;
        log::info!("Live location updated for '{}'", rider.name);
        Ok(RiderPoint::from_rider(rider))
    }

    /// Manual coordinate entry from text fields
    pub async fn update_location(&self, name: &str, lat: &str, lon: &str) -> Result<RiderProfile> {
        let Coordinates { lat, lon } = Coordinates::parse(lat, lon)?;
        let mut store = self.session.write().await;
        let rider = store.update_rider_location(name, lat, lon)?.clone();
        Ok(RiderProfile::build(&store, &rider))
    }
}

fn no_active_campaign(name: &str) -> HubError {
    HubError::Conflict(format!("Rider '{}' has no active campaign", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::model::{CampaignStatus, NewCampaign};
    use crate::market::seed::DEFAULT_SEED;
    use crate::market::tracking::DEFAULT_JITTER;

    async fn invited_session() -> Session {
        let session = Session::new(DEFAULT_SEED.build_store());
        session
            .create_campaign(NewCampaign::new("Sale", "Festive sale"))
            .await
            .unwrap();
        session.invite_riders("Sale").await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_login() {
        let session = invited_session().await;
        let view = RiderView::new(&session, DEFAULT_JITTER);

        let profile = view.login("ravi").await.unwrap();
        assert_eq!(profile.name, "Ravi");
        assert_eq!(profile.greeting, "Welcome back, Ravi from Bangalore");
        assert_eq!(profile.active_campaign.as_deref(), Some("Sale"));

        let err = view.login("Priya").await.unwrap_err();
        assert!(matches!(err, HubError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_accept_then_complete() {
        let session = invited_session().await;
        let view = RiderView::new(&session, DEFAULT_JITTER);

        let pending = view.pending_campaigns("Ravi").await.unwrap();
        assert_eq!(pending.len(), 1);

        let card = view.accept("Ravi", "Sale").await.unwrap();
        assert_eq!(card.status, CampaignStatus::AcceptedByRider);
        assert_eq!(card.accepted_by.as_deref(), Some("Ravi"));
        assert!(view.pending_campaigns("Ravi").await.unwrap().is_empty());

        let active = view.active_campaign("Ravi").await.unwrap().unwrap();
        assert_eq!(active.title, "Sale");

        let card = view.complete("Ravi").await.unwrap();
        assert_eq!(card.status, CampaignStatus::Completed);

        let profile = view.login("Ravi").await.unwrap();
        assert!(profile.available);
        assert!(profile.active_campaign.is_none());
        assert!(view.active_campaign("Ravi").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_complete_without_active_campaign() {
        let session = Session::new(DEFAULT_SEED.build_store());
        let view = RiderView::new(&session, DEFAULT_JITTER);

        let err = view.complete("Ravi").await.unwrap_err();
        assert!(matches!(err, HubError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_share_location_moves_within_jitter() {
        let session = invited_session().await;
        let view = RiderView::new(&session, DEFAULT_JITTER);

        let point = view.share_location("Ankit").await.unwrap();
        assert!((point.lat - 28.61).abs() <= DEFAULT_JITTER + 1e-9);
        assert!((point.lon - 77.21).abs() <= DEFAULT_JITTER + 1e-9);

        let err = view.share_location("Zara").await.unwrap_err();
        assert!(matches!(err, HubError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_location_from_text() {
        let session = Session::new(DEFAULT_SEED.build_store());
        let view = RiderView::new(&session, DEFAULT_JITTER);

        let profile = view.update_location("Ravi", "12.0", "77.0").await.unwrap();
        assert_eq!(profile.location, Coordinates::new(12.0, 77.0));

        let err = view
            .update_location("Ravi", "12.0", "east")
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::InvalidCoordinate(_)));

        let err = view.update_location("Priya", "1", "2").await.unwrap_err();
        assert!(matches!(err, HubError::NotFound { .. }));
    }
}
