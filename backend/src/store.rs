//! In-memory storage for farms, their layouts and survey sessions

use std::{collections::HashMap, sync::Arc};

use shared::{Farm, Plot, SurveySession, WalkingPath};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// A farm together with everything drawn on its grid
#[derive(Debug, Clone)]
pub struct FarmRecord {
    pub farm: Farm,
    /// Plots in insertion order
    pub plots: Vec<Plot>,
    pub paths: Vec<WalkingPath>,
}

impl FarmRecord {
    pub fn new(farm: Farm) -> Self {
        Self {
            farm,
            plots: Vec::new(),
            paths: Vec::new(),
        }
    }

    pub fn plot_mut(&mut self, plot_id: Uuid) -> AppResult<&mut Plot> {
        self.plots
            .iter_mut()
            .find(|p| p.id() == plot_id)
            .ok_or_else(|| AppError::NotFound("Plot".to_string()))
    }
}

#[derive(Debug, Default)]
pub struct StoreData {
    pub farms: HashMap<Uuid, FarmRecord>,
    pub surveys: HashMap<Uuid, SurveySession>,
}

impl StoreData {
    pub fn farm(&self, farm_id: Uuid) -> AppResult<&FarmRecord> {
        self.farms
            .get(&farm_id)
            .ok_or_else(|| AppError::NotFound("Farm".to_string()))
    }

    pub fn farm_mut(&mut self, farm_id: Uuid) -> AppResult<&mut FarmRecord> {
        self.farms
            .get_mut(&farm_id)
            .ok_or_else(|| AppError::NotFound("Farm".to_string()))
    }

    pub fn survey(&self, survey_id: Uuid) -> AppResult<&SurveySession> {
        self.surveys
            .get(&survey_id)
            .ok_or_else(|| AppError::NotFound("Survey".to_string()))
    }

    pub fn survey_mut(&mut self, survey_id: Uuid) -> AppResult<&mut SurveySession> {
        self.surveys
            .get_mut(&survey_id)
            .ok_or_else(|| AppError::NotFound("Survey".to_string()))
    }
}

/// Shared handle to the store. Concurrent writers are serialized by the lock;
/// the last write wins.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<StoreData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, StoreData> {
        self.inner.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, StoreData> {
        self.inner.write().await
    }
}
