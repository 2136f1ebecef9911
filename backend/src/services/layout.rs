//! Layout service: plot placement, plot movement and walking paths

use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared::{
    constrain_drag_with, find_placement_with, fits_in_grid, validate_name, DragOutcome,
    LayoutRules, PathColor, PathDraft, Placement, PlacementStrategy, Plot, PlotColor, Rectangle,
    WalkingPath,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::store::MemoryStore;

/// Layout service for managing plots and paths on a farm grid
#[derive(Clone)]
pub struct LayoutService {
    store: MemoryStore,
    rules: LayoutRules,
}

/// Input for creating a plot. The position is chosen automatically.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlotInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 1, max = 10000))]
    pub width: i32,
    #[validate(range(min = 1, max = 10000))]
    pub height: i32,
    pub color: Option<PlotColor>,
    #[validate(length(max = 100))]
    pub crop: Option<String>,
    #[validate(length(max = 100))]
    pub fertilizer: Option<String>,
    #[validate(range(min = 0.0))]
    pub expected_yield_kg: Option<f64>,
    pub notes: Option<String>,
}

/// Input for updating plot details
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePlotInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub color: Option<PlotColor>,
    #[validate(length(max = 100))]
    pub crop: Option<String>,
    #[validate(length(max = 100))]
    pub fertilizer: Option<String>,
    #[validate(range(min = 0.0))]
    pub expected_yield_kg: Option<f64>,
    pub notes: Option<String>,
}

/// Proposed plot origin in continuous cell units
#[derive(Debug, Deserialize)]
pub struct MovePlotInput {
    pub x: f64,
    pub y: f64,
}

/// A cell visited while drawing a path, in continuous cell units
#[derive(Debug, Deserialize)]
pub struct PathPointInput {
    pub x: f64,
    pub y: f64,
}

/// Input for creating a walking path
#[derive(Debug, Deserialize)]
pub struct CreatePathInput {
    pub color: Option<PathColor>,
    pub points: Vec<PathPointInput>,
}

/// A newly placed plot and how its position was found
#[derive(Debug, Serialize)]
pub struct PlacedPlot {
    pub plot: Plot,
    pub strategy: PlacementStrategy,
}

/// Plot after a move request
#[derive(Debug, Serialize)]
pub struct MovedPlot {
    pub plot: Plot,
    pub drag: DragOutcome,
}

impl LayoutService {
    /// Create a new LayoutService instance
    pub fn new(store: MemoryStore, rules: LayoutRules) -> Self {
        Self { store, rules }
    }

    /// Get all plots of a farm in insertion order
    pub async fn get_plots(&self, farm_id: Uuid) -> AppResult<Vec<Plot>> {
        let data = self.store.read().await;
        Ok(data.farm(farm_id)?.plots.clone())
    }

    /// Create a plot at the first free position of the farm grid
    pub async fn create_plot(
        &self,
        farm_id: Uuid,
        input: CreatePlotInput,
    ) -> AppResult<PlacedPlot> {
        input.validate()?;
        validate_name(&input.name).map_err(|msg| AppError::validation("name", msg))?;

        let mut data = self.store.write().await;
        let record = data.farm_mut(farm_id)?;
        let grid = record.farm.grid;

        if !fits_in_grid(input.width, input.height, grid.width, grid.height, grid.boundary_margin) {
            return Err(AppError::validation(
                "width",
                "Plot does not fit inside the farm grid",
            ));
        }

        let existing: Vec<Rectangle> = record.plots.iter().map(|p| p.footprint).collect();
        let Placement { position, strategy } =
            find_placement_with(&existing, input.width, input.height, &grid, &self.rules)?;

        if strategy == PlacementStrategy::AppendBelow {
            tracing::warn!(
                farm_id = %farm_id,
                x = position.x,
                y = position.y,
                "Grid is full, plot appended below existing plots"
            );
        }

        let now = Utc::now();
        let footprint = Rectangle::new(
            Uuid::new_v4(),
            position.x,
            position.y,
            input.width,
            input.height,
        );
        let plot = Plot {
            footprint,
            farm_id,
            name: input.name.trim().to_string(),
            color: input.color.unwrap_or_default(),
            crop: input.crop,
            fertilizer: input.fertilizer,
            expected_yield_kg: input.expected_yield_kg,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };
        record.plots.push(plot.clone());
        record.farm.updated_at = now;

        tracing::info!(
            farm_id = %farm_id,
            plot_id = %plot.id(),
            x = position.x,
            y = position.y,
            cells = plot.area_cells(),
            strategy = %strategy,
            "Plot placed"
        );
        Ok(PlacedPlot { plot, strategy })
    }

    /// Move a plot towards a proposed position, applying grid constraints and
    /// the overlap policy
    pub async fn move_plot(
        &self,
        farm_id: Uuid,
        plot_id: Uuid,
        input: MovePlotInput,
    ) -> AppResult<MovedPlot> {
        if !input.x.is_finite() || !input.y.is_finite() {
            return Err(AppError::validation("x", "Position must be finite"));
        }

        let mut data = self.store.write().await;
        let record = data.farm_mut(farm_id)?;
        let grid = record.farm.grid;
        let others: Vec<Rectangle> = record.plots.iter().map(|p| p.footprint).collect();

        let plot = record.plot_mut(plot_id)?;
        let drag = constrain_drag_with(
            &plot.footprint,
            input.x,
            input.y,
            &grid,
            &others,
            &self.rules,
        );

        match drag {
            DragOutcome::Moved { position } => {
                plot.footprint = plot.footprint.moved_to(position);
                plot.updated_at = Utc::now();
                tracing::debug!(plot_id = %plot_id, position = %position, "Plot moved");
            }
            DragOutcome::Blocked { position } => {
                tracing::debug!(
                    plot_id = %plot_id,
                    position = %position,
                    "Plot move blocked by overlap"
                );
            }
            DragOutcome::Unchanged => {}
        }

        Ok(MovedPlot {
            plot: plot.clone(),
            drag,
        })
    }

    /// Update plot details (not its position)
    pub async fn update_plot(
        &self,
        farm_id: Uuid,
        plot_id: Uuid,
        input: UpdatePlotInput,
    ) -> AppResult<Plot> {
        input.validate()?;
        if let Some(name) = &input.name {
            validate_name(name).map_err(|msg| AppError::validation("name", msg))?;
        }

        let mut data = self.store.write().await;
        let plot = data.farm_mut(farm_id)?.plot_mut(plot_id)?;

        if let Some(name) = input.name {
            plot.name = name.trim().to_string();
        }
        if let Some(color) = input.color {
            plot.color = color;
        }
        if input.crop.is_some() {
            plot.crop = input.crop;
        }
        if input.fertilizer.is_some() {
            plot.fertilizer = input.fertilizer;
        }
        if input.expected_yield_kg.is_some() {
            plot.expected_yield_kg = input.expected_yield_kg;
        }
        if input.notes.is_some() {
            plot.notes = input.notes;
        }
        plot.updated_at = Utc::now();

        Ok(plot.clone())
    }

    /// Delete a plot
    pub async fn delete_plot(&self, farm_id: Uuid, plot_id: Uuid) -> AppResult<()> {
        let mut data = self.store.write().await;
        let record = data.farm_mut(farm_id)?;
        let before = record.plots.len();
        record.plots.retain(|p| p.id() != plot_id);
        if record.plots.len() == before {
            return Err(AppError::NotFound("Plot".to_string()));
        }

        tracing::info!(farm_id = %farm_id, plot_id = %plot_id, "Plot deleted");
        Ok(())
    }

    /// Create a walking path from the cells a pointer passed over
    pub async fn create_path(
        &self,
        farm_id: Uuid,
        input: CreatePathInput,
    ) -> AppResult<WalkingPath> {
        let mut data = self.store.write().await;
        let record = data.farm_mut(farm_id)?;
        let grid = record.farm.grid;

        let path = input
            .points
            .iter()
            .fold(PathDraft::start(input.color.unwrap_or_default()), |draft, point| {
                draft.extend(point.x, point.y, &grid)
            })
            .finish(Uuid::new_v4())?;

        record.paths.push(path.clone());
        record.farm.updated_at = Utc::now();

        tracing::info!(
            farm_id = %farm_id,
            path_id = %path.id,
            cells = path.cells.len(),
            "Path created"
        );
        Ok(path)
    }

    /// Delete a walking path
    pub async fn delete_path(&self, farm_id: Uuid, path_id: Uuid) -> AppResult<()> {
        let mut data = self.store.write().await;
        let record = data.farm_mut(farm_id)?;
        let before = record.paths.len();
        record.paths.retain(|p| p.id != path_id);
        if record.paths.len() == before {
            return Err(AppError::NotFound("Path".to_string()));
        }
        Ok(())
    }
}
