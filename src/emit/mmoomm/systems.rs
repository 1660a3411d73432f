//! Global runtime systems shared by every entity of a bundle.
//!
//! Dependencies are declared for ordering only; the generated code checks at
//! runtime that the systems it relies on are present.

use crate::emit::js_number;
use ahash::AHashSet;
use itertools::Itertools;
use tracing::warn;

pub trait SystemGenerator: Send + Sync {
    fn name(&self) -> &str;

    fn dependencies(&self) -> &'static [&'static str] {
        &[]
    }

    fn generate(&self) -> String;
}

/// Rigid body world settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsSystem {
    /// Zero-g by default.
    pub gravity: f64,
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self { gravity: 0.0 }
    }
}

impl SystemGenerator for PhysicsSystem {
    fn name(&self) -> &str {
        "physics"
    }

    fn generate(&self) -> String {
        format!(
            r#"// Physics system
window.SpacePhysics = {{
    initialized: false,
    initialize: function (app) {{
        if (!app.systems.rigidbody) {{
            console.error('Physics system not available!');
            return false;
        }}
        app.systems.rigidbody.gravity.set(0, {gravity}, 0);
        this.initialized = true;
        return true;
    }}
}};
"#,
            gravity = js_number(self.gravity),
        )
    }
}

/// Helper functions used by the entity archetypes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HelperSystem;

impl SystemGenerator for HelperSystem {
    fn name(&self) -> &str {
        "helpers"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["physics"]
    }

    fn generate(&self) -> String {
        r#"// Helper system
window.SpaceHelpers = {
    app: null,
    install: function (app) {
        this.app = app;
        if (!window.SpacePhysics || !window.SpacePhysics.initialize(app)) {
            console.error('Physics system not available!');
        }
        this.installClickPicking(app);
    },
    findPlayerShip: function () {
        if (!this.app) {
            return null;
        }
        const ships = this.app.root.findByTag('player');
        return ships.length > 0 ? ships[0] : null;
    },
    distance: function (a, b) {
        return a.getPosition().distance(b.getPosition());
    },
    notify: function (message) {
        const hud = document.getElementById('updl-notice');
        if (!hud) {
            console.log(message);
            return;
        }
        hud.textContent = message;
        hud.style.opacity = 1;
        clearTimeout(hud.hideTimer);
        hud.hideTimer = setTimeout(function () {
            hud.style.opacity = 0;
        }, 2000);
    },
    fireLaser: function (ship, power, range) {
        const from = ship.getPosition();
        const to = from.clone().add(ship.forward.clone().mulScalar(range));
        const hit = this.app.systems.rigidbody ? this.app.systems.rigidbody.raycastFirst(from, to) : null;
        if (hit && hit.entity.mineable) {
            return hit.entity.mineable.hit(power);
        }
        return 0;
    },
    installClickPicking: function (app) {
        if (!app.mouse) {
            return;
        }
        app.mouse.on(pc.EVENT_MOUSEDOWN, function (event) {
            const camera = app.root.findByName('Camera');
            if (!camera || !camera.camera || !app.systems.rigidbody) {
                return;
            }
            const from = camera.camera.screenToWorld(event.x, event.y, camera.camera.nearClip);
            const to = camera.camera.screenToWorld(event.x, event.y, camera.camera.farClip);
            const hit = app.systems.rigidbody.raycastFirst(from, to);
            if (hit) {
                hit.entity.fire('click');
            }
        });
    }
};
"#
        .to_string()
    }
}

/// Orders systems so that each comes after its dependencies, keeping registration
/// order otherwise. Unknown dependencies and cycles are logged and ignored.
pub fn order_systems(systems: &[Box<dyn SystemGenerator>]) -> Vec<&dyn SystemGenerator> {
    let known: AHashSet<&str> = systems.iter().map(|s| s.name()).collect();
    for system in systems {
        for dependency in system.dependencies() {
            if !known.contains(dependency) {
                warn!(system = system.name(), dependency, "Unknown system dependency");
            }
        }
    }

    let mut placed: AHashSet<&str> = AHashSet::new();
    let mut done = vec![false; systems.len()];
    let mut ordered: Vec<&dyn SystemGenerator> = Vec::with_capacity(systems.len());
    while ordered.len() < systems.len() {
        let ready = systems.iter().enumerate().position(|(i, s)| {
            !done[i]
                && s
                    .dependencies()
                    .iter()
                    .all(|d| placed.contains(d) || !known.contains(d))
        });
        match ready {
            Some(i) => {
                done[i] = true;
                placed.insert(systems[i].name());
                ordered.push(systems[i].as_ref());
            }
            None => {
                let remaining = systems
                    .iter()
                    .zip(&done)
                    .filter(|(_, done)| !**done)
                    .map(|(s, _)| s.name())
                    .join(", ");
                warn!(%remaining, "Cyclic system dependencies, keeping registration order");
                for (i, system) in systems.iter().enumerate() {
                    if !done[i] {
                        done[i] = true;
                        ordered.push(system.as_ref());
                    }
                }
            }
        }
    }
    ordered
}

/// Built-in systems in registration order.
pub fn default_systems() -> Vec<Box<dyn SystemGenerator>> {
    vec![Box::new(PhysicsSystem::default()), Box::new(HelperSystem)]
}
