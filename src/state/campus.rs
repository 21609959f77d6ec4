use std::collections::BTreeSet;
use std::rc::Rc;

use log::{debug, error, warn};
use yew::Reducible;

use crate::errors::CampusError;
use crate::model::{LatLon, STUDY_SPOTS, StatusValue, StudySpot, find_spot};
use crate::proximity::ProximityDetector;
use crate::store::StatusStore;

#[derive(Clone, Debug, PartialEq)]
pub struct SidebarEntry {
    pub spot: &'static StudySpot,
    /// `None` when the stored status could not be read; the row shows no status.
    pub status: Option<StatusValue>,
}

impl SidebarEntry {
    pub fn class(&self) -> String {
        match self.status {
            Some(status) => format!("status {}", status.css_class()),
            None => "status".to_string(),
        }
    }

    pub fn text(&self) -> &'static str {
        self.status.map(|s| s.as_str()).unwrap_or("")
    }
}

#[derive(Clone, PartialEq)]
pub struct CampusState {
    store: StatusStore,
    detector: ProximityDetector,
    /// Last fix from the location watch; never persisted.
    pub user_position: Option<LatLon>,
    /// Ids of spots whose update panel is showing.
    pub open_panels: BTreeSet<&'static str>,
    pub sidebar: Vec<SidebarEntry>,
}

impl CampusState {
    /// Seeds missing statuses and takes the first sidebar snapshot.
    pub fn new(store: StatusStore, detector: ProximityDetector) -> Self {
        if let Err(e) = store.initialize(&STUDY_SPOTS) {
            error!("Error initializing statuses: {}", e);
        }
        let sidebar = read_sidebar(&store);
        Self {
            store,
            detector,
            user_position: None,
            open_panels: BTreeSet::new(),
            sidebar,
        }
    }

    pub fn panel_open(&self, spot_id: &str) -> bool {
        self.open_panels.contains(spot_id)
    }

    pub fn open_spots(&self) -> impl Iterator<Item = &'static StudySpot> + '_ {
        STUDY_SPOTS.iter().filter(|s| self.panel_open(s.id))
    }

    fn refresh(&mut self) {
        self.sidebar = read_sidebar(&self.store);
    }

    fn track(&mut self, user: LatLon) {
        self.user_position = Some(user);
        for (spot, at) in self.detector.check(user, &STUDY_SPOTS) {
            if at {
                if self.open_panels.insert(spot.id) {
                    debug!("near {}, showing status panel", spot.id);
                }
            } else if self.open_panels.remove(spot.id) {
                debug!("left {}, hiding status panel", spot.id);
            }
        }
    }

    fn submit(&mut self, spot: &'static StudySpot, value: StatusValue) -> Result<(), CampusError> {
        self.store.set(spot, value)?;
        self.refresh();
        self.open_panels.remove(spot.id);
        Ok(())
    }
}

fn read_sidebar(store: &StatusStore) -> Vec<SidebarEntry> {
    STUDY_SPOTS
        .iter()
        .map(|spot| {
            let status = match store.get(spot) {
                Ok(status) => Some(status),
                Err(e) => {
                    warn!("Skipping sidebar status for {}: {}", spot.id, e);
                    None
                }
            };
            SidebarEntry { spot, status }
        })
        .collect()
}

#[derive(Clone, Debug)]
pub enum CampusAction {
    Refresh,
    LocationUpdated(LatLon),
    SubmitStatus { spot_id: String, value: StatusValue },
}

impl Reducible for CampusState {
    type Action = CampusAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use CampusAction::*;
        let mut new = (*self).clone();
        match action {
            Refresh => new.refresh(),
            LocationUpdated(user) => new.track(user),
            SubmitStatus { spot_id, value } => {
                let Some(spot) = find_spot(&spot_id) else {
                    warn!("Ignoring status for unknown spot {}", spot_id);
                    return self;
                };
                if let Err(e) = new.submit(spot, value) {
                    error!("Error saving status for {}: {}", spot.id, e);
                    return self;
                }
            }
        }
        Rc::new(new)
    }
}
