//! Typed status persistence over a string key-value backend.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, info, warn};
use snafu::OptionExt;

use crate::errors::{
    CampusError, MissingStatusSnafu, StorageReadSnafu, StorageUnavailableSnafu,
    StorageWriteSnafu, js_message,
};
use crate::model::{StatusValue, StudySpot};

/// String key-value storage, shaped after `window.localStorage`.
pub trait KeyValueBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, CampusError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), CampusError>;
}

pub struct LocalStorageBackend {
    storage: web_sys::Storage,
}

impl LocalStorageBackend {
    pub fn from_window() -> Result<Self, CampusError> {
        let window = web_sys::window().context(StorageUnavailableSnafu {
            message: "no global window",
        })?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => StorageUnavailableSnafu {
                message: "localStorage is null",
            }
            .fail(),
            Err(e) => StorageUnavailableSnafu {
                message: js_message(&e),
            }
            .fail(),
        }
    }
}

impl KeyValueBackend for LocalStorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, CampusError> {
        self.storage.get_item(key).map_err(|e| {
            StorageReadSnafu {
                key,
                message: js_message(&e),
            }
            .build()
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CampusError> {
        self.storage.set_item(key, value).map_err(|e| {
            StorageWriteSnafu {
                key,
                message: js_message(&e),
            }
            .build()
        })
    }
}

#[derive(Default, Debug)]
pub struct MemoryBackend {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, CampusError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CampusError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Per-spot statuses. Only `StatusValue`s go in, and only `StatusValue`s come out.
#[derive(Clone)]
pub struct StatusStore {
    backend: Rc<dyn KeyValueBackend>,
}

impl PartialEq for StatusStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.backend, &other.backend)
    }
}

impl StatusStore {
    pub fn new(backend: Rc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Local storage when the browser allows it, memory otherwise.
    pub fn open_browser() -> Self {
        match LocalStorageBackend::from_window() {
            Ok(backend) => Self::new(Rc::new(backend)),
            Err(e) => {
                warn!("{}; statuses will not survive a reload", e);
                Self::new(Rc::new(MemoryBackend::new()))
            }
        }
    }

    pub fn backend(&self) -> &Rc<dyn KeyValueBackend> {
        &self.backend
    }

    pub fn get(&self, spot: &StudySpot) -> Result<StatusValue, CampusError> {
        match self.backend.get_item(&spot.storage_key())? {
            Some(raw) if !raw.is_empty() => raw.parse(),
            _ => MissingStatusSnafu { spot: spot.id }.fail(),
        }
    }

    pub fn set(&self, spot: &StudySpot, value: StatusValue) -> Result<(), CampusError> {
        debug!("{} -> {}", spot.storage_key(), value);
        self.backend.set_item(&spot.storage_key(), value.as_str())
    }

    /// Writes each spot's default where nothing usable is stored yet.
    pub fn initialize(&self, spots: &[StudySpot]) -> Result<(), CampusError> {
        for spot in spots {
            match self.get(spot) {
                Ok(_) => {}
                Err(CampusError::MissingStatus { .. }) => {
                    info!("seeding {} with {}", spot.storage_key(), spot.default_status);
                    self.set(spot, spot.default_status)?;
                }
                Err(CampusError::InvalidStatus { value }) => {
                    warn!(
                        "replacing unrecognized {} value {:?} with {}",
                        spot.storage_key(),
                        value,
                        spot.default_status
                    );
                    self.set(spot, spot.default_status)?;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
