//! Background mesh loading so the frame loop never waits on disk.
//!
//! Loads are fire-and-forget: one thread per request, result sent back over
//! a channel with the ticket it was issued under.  A visual that scrolls out
//! of its window while its mesh is still loading tears its slot down, and
//! the late result is dropped on arrival.  Failures are logged once and
//! never retried.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::assets::{
    resolve_model_path,
    stl::{Mesh, MeshError},
};
use crate::core::animation::visual_mounted;
use crate::core::catalog::Scene;

pub struct AssetUpdate {
    pub model: String,
    pub ticket: u64,
    pub result: Result<Mesh, MeshError>,
}

pub fn spawn_mesh_load(
    tx: mpsc::UnboundedSender<AssetUpdate>,
    model: String,
    ticket: u64,
    path: PathBuf,
) {
    std::thread::spawn(move || {
        let t0 = std::time::Instant::now();
        let result = Mesh::load(&path);
        tracing::debug!("mesh load: {:.2?} path={}", t0.elapsed(), path.display());
        // Receiver gone means the app is shutting down.
        let _ = tx.send(AssetUpdate {
            model,
            ticket,
            result,
        });
    });
}

/// Load state of one model path.
#[derive(Debug, Clone)]
pub enum MeshSlot {
    Loading { ticket: u64 },
    Ready(Arc<Mesh>),
    Failed,
}

/// Mesh slots keyed by authored model path.
pub struct MeshCache {
    root: PathBuf,
    slots: HashMap<String, MeshSlot>,
    next_ticket: u64,
    tx: mpsc::UnboundedSender<AssetUpdate>,
}

impl MeshCache {
    pub fn new(root: PathBuf, tx: mpsc::UnboundedSender<AssetUpdate>) -> Self {
        Self {
            root,
            slots: HashMap::new(),
            next_ticket: 0,
            tx,
        }
    }

    /// Start loading `model` unless it already has a slot.
    pub fn request(&mut self, model: &str) {
        if self.slots.contains_key(model) {
            return;
        }
        self.next_ticket = self.next_ticket.wrapping_add(1);
        let ticket = self.next_ticket;
        let path = resolve_model_path(&self.root, model);
        tracing::info!(model, path = %path.display(), "loading mesh");
        self.slots
            .insert(model.to_string(), MeshSlot::Loading { ticket });
        spawn_mesh_load(self.tx.clone(), model.to_string(), ticket, path);
    }

    /// Tear down an in-flight load.  Finished slots are kept.
    pub fn release(&mut self, model: &str) {
        if let Some(MeshSlot::Loading { ticket }) = self.slots.get(model) {
            tracing::debug!(model, ticket, "mesh load abandoned");
            self.slots.remove(model);
        }
    }

    /// Request meshes for every mounted visual and release the rest.
    pub fn sync(&mut self, scenes: &[Scene], progress: f64) {
        let mut mounted = HashSet::new();
        for (index, scene) in scenes.iter().enumerate() {
            if let Some(model) = &scene.visual.model {
                if visual_mounted(progress, index, scene) {
                    mounted.insert(model.as_str());
                }
            }
        }
        for model in &mounted {
            self.request(model);
        }
        let stale: Vec<String> = self
            .slots
            .iter()
            .filter(|(model, slot)| {
                matches!(slot, MeshSlot::Loading { .. }) && !mounted.contains(model.as_str())
            })
            .map(|(model, _)| model.clone())
            .collect();
        for model in stale {
            self.release(&model);
        }
    }

    /// Apply a finished load.  Returns `true` if it landed in a live slot.
    pub fn apply(&mut self, update: AssetUpdate) -> bool {
        let live = matches!(
            self.slots.get(&update.model),
            Some(MeshSlot::Loading { ticket }) if *ticket == update.ticket
        );
        if !live {
            tracing::debug!(model = %update.model, ticket = update.ticket, "discarding stale mesh result");
            return false;
        }
        let slot = match update.result {
            Ok(mesh) => {
                tracing::info!(model = %update.model, triangles = mesh.triangle_count(), "mesh ready");
                MeshSlot::Ready(Arc::new(mesh))
            }
            Err(err) => {
                tracing::warn!(model = %update.model, "failed to load mesh: {err}");
                MeshSlot::Failed
            }
        };
        self.slots.insert(update.model, slot);
        true
    }

    pub fn get(&self, model: &str) -> Option<&Arc<Mesh>> {
        match self.slots.get(model) {
            Some(MeshSlot::Ready(mesh)) => Some(mesh),
            _ => None,
        }
    }

    pub fn slot(&self, model: &str) -> Option<&MeshSlot> {
        self.slots.get(model)
    }

    pub fn is_loading(&self) -> bool {
        self.slots
            .values()
            .any(|slot| matches!(slot, MeshSlot::Loading { .. }))
    }
}
