//! Per-archetype behaviour generators. Each archetype has a typed parameter
//! object read from the entity's components and a pure render function
//! `(entity_id, config) -> String`.

use crate::emit::{js_number, js_string};
use crate::model::{Entity, Vec3};

/// Lifetime of a dropped resource pickup before it expires.
pub const PICKUP_LIFETIME_MS: u64 = 30_000;
/// Distance at which the player ship collects a pickup automatically.
pub const PICKUP_COLLECT_RADIUS: f64 = 3.0;
/// Duration of the gate's visual flash after a transport.
pub const GATE_FLASH_MS: u64 = 300;

/// Default primitive and colour used when an entity has no render component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub primitive: &'static str,
    pub color: &'static str,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            primitive: "box",
            color: "#cccccc",
        }
    }
}

/// Generates the runtime behaviour for one `entityType`.
pub trait EntityTypeGenerator: Send + Sync {
    fn entity_type(&self) -> &str;

    fn appearance(&self) -> Appearance {
        Appearance::default()
    }

    /// Code placed inside the entity's scope, where `entity` and `app` are bound.
    fn generate(&self, entity: &Entity) -> String;
}

fn half_extents(scale: &Vec3) -> String {
    format!(
        "new pc.Vec3({}, {}, {})",
        js_number(scale.x / 2.0),
        js_number(scale.y / 2.0),
        js_number(scale.z / 2.0)
    )
}

// ---------------------------------------------------------------------------
// Asteroid
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidConfig {
    pub resource_type: String,
    pub max_yield: f64,
    pub radius: f64,
}

impl AsteroidConfig {
    pub fn from_entity(entity: &Entity) -> Self {
        let mineable = entity.component("mineable");
        let scale = entity.transform.scale;
        Self {
            resource_type: mineable
                .and_then(|c| c.text("resourceType"))
                .unwrap_or("asteroidMass")
                .to_string(),
            max_yield: mineable.and_then(|c| c.number("maxYield")).unwrap_or(1.5),
            radius: scale.x.max(scale.y).max(scale.z) / 2.0,
        }
    }
}

/// Asteroid lifecycle: hit reduces the yield, an exhausted asteroid is destroyed
/// and drops a pickup, which the player collects on proximity or which expires.
pub fn generate_asteroid(entity_id: &str, config: &AsteroidConfig) -> String {
    format!(
        r#"    // Asteroid: mineable resource node
    entity.tags.add('asteroid');
    entity.addComponent('collision', {{ type: 'sphere', radius: {radius} }});
    entity.addComponent('rigidbody', {{ type: 'static', restitution: 0.3 }});

    entity.mineable = {{
        resourceType: {resource_type},
        maxYield: {max_yield},
        currentYield: {max_yield},
        isDepleted: false,
        hit: function (power) {{
            if (this.isDepleted) {{
                return 0;
            }}
            const mined = Math.min(power, this.currentYield);
            this.currentYield -= mined;
            if (this.currentYield <= 0) {{
                this.deplete();
            }}
            return mined;
        }},
        deplete: function () {{
            this.isDepleted = true;
            const position = entity.getPosition().clone();
            entity.destroy();
            spawnPickup(position, this.resourceType, this.maxYield);
        }}
    }};

    function spawnPickup(position, resourceType, amount) {{
        const pickup = new pc.Entity({pickup_id});
        pickup.addComponent('render', {{ type: 'box' }});
        pickup.setLocalScale(0.3, 0.3, 0.3);
        pickup.setPosition(position);
        pickup.tags.add('pickup');
        app.root.addChild(pickup);

        let active = true;
        const release = function () {{
            if (!active) {{
                return;
            }}
            active = false;
            app.off('update', onUpdate);
            clearTimeout(expireTimer);
            pickup.destroy();
        }};
        const onUpdate = function () {{
            const ship = window.SpaceHelpers.findPlayerShip();
            if (!ship || window.SpaceHelpers.distance(ship, pickup) > {collect_radius}) {{
                return;
            }}
            const added = ship.inventory ? ship.inventory.add(resourceType, amount) : 0;
            if (added > 0) {{
                window.SpaceHelpers.notify('Collected ' + added + ' ' + resourceType);
                release();
            }}
        }};
        const expireTimer = setTimeout(release, {lifetime});
        app.on('update', onUpdate);
    }}
"#,
        radius = js_number(config.radius),
        resource_type = js_string(&config.resource_type),
        max_yield = js_number(config.max_yield),
        pickup_id = js_string(&format!("{}-pickup", entity_id)),
        collect_radius = js_number(PICKUP_COLLECT_RADIUS),
        lifetime = PICKUP_LIFETIME_MS,
    )
}

pub struct AsteroidGenerator;

impl EntityTypeGenerator for AsteroidGenerator {
    fn entity_type(&self) -> &str {
        "asteroid"
    }

    fn appearance(&self) -> Appearance {
        Appearance {
            primitive: "sphere",
            color: "#8b7355",
        }
    }

    fn generate(&self, entity: &Entity) -> String {
        generate_asteroid(&entity.id, &AsteroidConfig::from_entity(entity))
    }
}

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct GateConfig {
    pub target_world: String,
    /// Milliseconds between two transports.
    pub cooldown_time: f64,
    pub half_extents: Vec3,
}

impl GateConfig {
    pub fn from_entity(entity: &Entity) -> Self {
        let portal = entity.component("portal");
        let scale = entity.transform.scale;
        Self {
            target_world: portal
                .and_then(|c| c.text("targetWorld"))
                .unwrap_or("next")
                .to_string(),
            cooldown_time: portal.and_then(|c| c.number("cooldownTime")).unwrap_or(2000.0),
            half_extents: scale,
        }
    }
}

/// Gate lifecycle: a player touching the trigger is transported when the
/// cooldown has elapsed; the gate flashes and fires `world:switch`.
pub fn generate_gate(entity_id: &str, config: &GateConfig) -> String {
    format!(
        r#"    // Gate: portal to another world
    entity.tags.add('gate');
    entity.addComponent('collision', {{ type: 'box', halfExtents: {half_extents} }});

    entity.portal = {{
        targetWorld: {target_world},
        cooldownTime: {cooldown},
        lastUsed: -Infinity,
        canUse: function () {{
            return Date.now() - this.lastUsed >= this.cooldownTime;
        }},
        transport: function (ship) {{
            if (!this.canUse()) {{
                return false;
            }}
            this.lastUsed = Date.now();
            this.flash();
            app.fire('world:switch', {{ gate: {gate_id}, targetWorld: this.targetWorld, ship: ship }});
            window.SpaceHelpers.notify('Jumping to ' + this.targetWorld);
            return true;
        }},
        flash: function () {{
            if (!entity.render) {{
                return;
            }}
            entity.render.meshInstances.forEach(function (meshInstance) {{
                const material = meshInstance.material;
                if (!material || !material.emissive) {{
                    return;
                }}
                const original = material.emissive.clone();
                material.emissive = new pc.Color(1, 1, 1);
                material.update();
                setTimeout(function () {{
                    material.emissive = original;
                    material.update();
                }}, {flash_ms});
            }});
        }}
    }};

    entity.collision.on('triggerenter', function (other) {{
        if (other.tags && other.tags.has('player')) {{
            entity.portal.transport(other);
        }}
    }});
"#,
        half_extents = half_extents(&config.half_extents),
        target_world = js_string(&config.target_world),
        cooldown = js_number(config.cooldown_time),
        gate_id = js_string(entity_id),
        flash_ms = GATE_FLASH_MS,
    )
}

pub struct GateGenerator;

impl EntityTypeGenerator for GateGenerator {
    fn entity_type(&self) -> &str {
        "gate"
    }

    fn appearance(&self) -> Appearance {
        Appearance {
            primitive: "torus",
            color: "#4fc3f7",
        }
    }

    fn generate(&self, entity: &Entity) -> String {
        generate_gate(&entity.id, &GateConfig::from_entity(entity))
    }
}

// ---------------------------------------------------------------------------
// Ship
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ShipConfig {
    pub cargo_capacity: f64,
    pub thrust: f64,
    pub turn_torque: f64,
    pub laser_power: f64,
    pub laser_range: f64,
    pub half_extents: Vec3,
}

impl ShipConfig {
    pub fn from_entity(entity: &Entity) -> Self {
        let inventory = entity.component("inventory");
        let engine = entity.component("engine");
        let weapon = entity.component("weapon");
        Self {
            cargo_capacity: inventory.and_then(|c| c.number("maxCapacity")).unwrap_or(20.0),
            thrust: engine.and_then(|c| c.number("thrust")).unwrap_or(10.0),
            turn_torque: engine.and_then(|c| c.number("turnTorque")).unwrap_or(2.0),
            laser_power: weapon.and_then(|c| c.number("power")).unwrap_or(1.0),
            laser_range: weapon.and_then(|c| c.number("range")).unwrap_or(75.0),
            half_extents: entity.transform.scale,
        }
    }
}

/// Player ship: physics body, cargo hold, keyboard flight controls and a mining laser.
pub fn generate_ship(entity_id: &str, config: &ShipConfig) -> String {
    format!(
        r#"    // Ship: player controlled
    entity.tags.add('player');
    entity.shipId = {ship_id};
    entity.addComponent('collision', {{ type: 'box', halfExtents: {half_extents} }});
    entity.addComponent('rigidbody', {{ type: 'dynamic', mass: 1, linearDamping: 0.5, angularDamping: 0.8 }});

    entity.inventory = {{
        capacity: {capacity},
        currentLoad: 0,
        items: {{}},
        add: function (resourceType, amount) {{
            const added = Math.min(amount, this.capacity - this.currentLoad);
            if (added <= 0) {{
                return 0;
            }}
            this.items[resourceType] = (this.items[resourceType] || 0) + added;
            this.currentLoad += added;
            app.fire('inventory:changed', this);
            return added;
        }},
        clear: function () {{
            const total = this.currentLoad;
            this.items = {{}};
            this.currentLoad = 0;
            app.fire('inventory:changed', this);
            return total;
        }}
    }};

    app.on('update', function () {{
        if (!entity.rigidbody || !app.keyboard) {{
            return;
        }}
        const keyboard = app.keyboard;
        if (keyboard.isPressed(pc.KEY_W)) {{
            entity.rigidbody.applyForce(entity.forward.clone().mulScalar({thrust}));
        }}
        if (keyboard.isPressed(pc.KEY_S)) {{
            entity.rigidbody.applyForce(entity.forward.clone().mulScalar({reverse}));
        }}
        if (keyboard.isPressed(pc.KEY_A)) {{
            entity.rigidbody.applyTorque(0, {turn}, 0);
        }}
        if (keyboard.isPressed(pc.KEY_D)) {{
            entity.rigidbody.applyTorque(0, {turn_back}, 0);
        }}
        if (keyboard.wasPressed(pc.KEY_SPACE)) {{
            window.SpaceHelpers.fireLaser(entity, {laser_power}, {laser_range});
        }}
    }});
"#,
        ship_id = js_string(entity_id),
        half_extents = half_extents(&config.half_extents),
        capacity = js_number(config.cargo_capacity),
        thrust = js_number(config.thrust),
        reverse = js_number(-config.thrust),
        turn = js_number(config.turn_torque),
        turn_back = js_number(-config.turn_torque),
        laser_power = js_number(config.laser_power),
        laser_range = js_number(config.laser_range),
    )
}

pub struct ShipGenerator;

impl EntityTypeGenerator for ShipGenerator {
    fn entity_type(&self) -> &str {
        "ship"
    }

    fn appearance(&self) -> Appearance {
        Appearance {
            primitive: "cone",
            color: "#e0e0e0",
        }
    }

    fn generate(&self, entity: &Entity) -> String {
        generate_ship(&entity.id, &ShipConfig::from_entity(entity))
    }
}

// ---------------------------------------------------------------------------
// Station
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct StationConfig {
    pub price_per_ton: f64,
    pub interaction_range: f64,
    pub half_extents: Vec3,
}

impl StationConfig {
    pub fn from_entity(entity: &Entity) -> Self {
        let trading = entity.component("trading");
        Self {
            price_per_ton: trading.and_then(|c| c.number("pricePerTon")).unwrap_or(10.0),
            interaction_range: trading
                .and_then(|c| c.number("interactionRange"))
                .unwrap_or(15.0),
            half_extents: entity.transform.scale,
        }
    }
}

/// Trading station: a player in range presses `T` to sell the whole cargo hold.
pub fn generate_station(entity_id: &str, config: &StationConfig) -> String {
    format!(
        r#"    // Station: trading post
    entity.tags.add('station');
    entity.addComponent('collision', {{ type: 'box', halfExtents: {half_extents} }});
    entity.addComponent('rigidbody', {{ type: 'static' }});

    entity.trading = {{
        pricePerTon: {price},
        interactionRange: {range},
        canTrade: function (ship) {{
            return !!ship && window.SpaceHelpers.distance(ship, entity) <= this.interactionRange;
        }},
        sell: function (ship) {{
            if (!this.canTrade(ship) || !ship.inventory) {{
                return 0;
            }}
            const amount = ship.inventory.clear();
            const credits = amount * this.pricePerTon;
            app.fire('trade:completed', {{ station: {station_id}, amount: amount, credits: credits }});
            window.SpaceHelpers.notify('Sold ' + amount + ' for ' + credits + ' credits');
            return credits;
        }}
    }};

    app.on('update', function () {{
        if (app.keyboard && app.keyboard.wasPressed(pc.KEY_T)) {{
            entity.trading.sell(window.SpaceHelpers.findPlayerShip());
        }}
    }});
"#,
        half_extents = half_extents(&config.half_extents),
        price = js_number(config.price_per_ton),
        range = js_number(config.interaction_range),
        station_id = js_string(entity_id),
    )
}

pub struct StationGenerator;

impl EntityTypeGenerator for StationGenerator {
    fn entity_type(&self) -> &str {
        "station"
    }

    fn appearance(&self) -> Appearance {
        Appearance {
            primitive: "cylinder",
            color: "#9e9e9e",
        }
    }

    fn generate(&self, entity: &Entity) -> String {
        generate_station(&entity.id, &StationConfig::from_entity(entity))
    }
}

/// Fallback for entity types without a dedicated archetype: only tags the entity.
pub struct DefaultEntityGenerator;

impl EntityTypeGenerator for DefaultEntityGenerator {
    fn entity_type(&self) -> &str {
        "default"
    }

    fn generate(&self, entity: &Entity) -> String {
        format!("    entity.tags.add({});\n", js_string(&entity.entity_type))
    }
}
