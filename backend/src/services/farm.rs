//! Farm project service

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{validate_area_acres, Farm, GridSize, Plot, WalkingPath};
use uuid::Uuid;
use validator::Validate;

use crate::config::LayoutConfig;
use crate::error::{AppError, AppResult};
use crate::store::{FarmRecord, MemoryStore};

/// Farm service for managing layout projects
#[derive(Clone)]
pub struct FarmService {
    store: MemoryStore,
    layout: LayoutConfig,
}

/// Input for creating a farm
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFarmInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub grid_size: Option<GridSize>,
    pub area_acres: Option<Decimal>,
}

/// Farm summary for listings
#[derive(Debug, Serialize)]
pub struct FarmSummary {
    #[serde(flatten)]
    pub farm: Farm,
    pub plot_count: usize,
    pub path_count: usize,
}

/// Farm with its full layout
#[derive(Debug, Serialize)]
pub struct FarmDetail {
    #[serde(flatten)]
    pub farm: Farm,
    pub area_square_meters: Option<Decimal>,
    pub plots: Vec<Plot>,
    pub paths: Vec<WalkingPath>,
}

impl From<&FarmRecord> for FarmDetail {
    fn from(record: &FarmRecord) -> Self {
        Self {
            area_square_meters: record.farm.area_square_meters(),
            farm: record.farm.clone(),
            plots: record.plots.clone(),
            paths: record.paths.clone(),
        }
    }
}

impl FarmService {
    /// Create a new FarmService instance
    pub fn new(store: MemoryStore, layout: LayoutConfig) -> Self {
        Self { store, layout }
    }

    /// Create a new farm with an empty grid
    pub async fn create_farm(&self, input: CreateFarmInput) -> AppResult<FarmDetail> {
        input.validate()?;
        if input.name.trim().is_empty() {
            return Err(AppError::validation("name", "Farm name cannot be empty"));
        }
        if let Some(acres) = input.area_acres {
            validate_area_acres(acres).map_err(|msg| AppError::validation("area_acres", msg))?;
        }

        let grid_size = input.grid_size.unwrap_or(self.layout.default_grid_size);
        let grid = self.layout.grid_for(grid_size);
        grid.validate()?;

        let now = Utc::now();
        let farm = Farm {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            grid_size,
            grid,
            area_acres: input.area_acres,
            created_at: now,
            updated_at: now,
        };

        let record = FarmRecord::new(farm);
        let detail = FarmDetail::from(&record);
        self.store.write().await.farms.insert(record.farm.id, record);

        tracing::info!(farm_id = %detail.farm.id, grid = %grid_size, "Farm created");
        Ok(detail)
    }

    /// List farms, oldest first
    pub async fn list_farms(&self) -> AppResult<Vec<FarmSummary>> {
        let data = self.store.read().await;
        let mut farms: Vec<FarmSummary> = data
            .farms
            .values()
            .map(|record| FarmSummary {
                farm: record.farm.clone(),
                plot_count: record.plots.len(),
                path_count: record.paths.len(),
            })
            .collect();
        farms.sort_by_key(|summary| summary.farm.created_at);
        Ok(farms)
    }

    /// Get a farm with its plots and paths
    pub async fn get_farm(&self, farm_id: Uuid) -> AppResult<FarmDetail> {
        let data = self.store.read().await;
        Ok(FarmDetail::from(data.farm(farm_id)?))
    }

    /// Delete a farm together with its surveys
    pub async fn delete_farm(&self, farm_id: Uuid) -> AppResult<()> {
        let mut data = self.store.write().await;
        if data.farms.remove(&farm_id).is_none() {
            return Err(AppError::NotFound("Farm".to_string()));
        }
        data.surveys.retain(|_, survey| survey.farm_id != farm_id);

        tracing::info!(farm_id = %farm_id, "Farm deleted");
        Ok(())
    }
}
