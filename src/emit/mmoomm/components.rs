//! Render components, events and actions attached to an entity.

use super::entities::Appearance;
use crate::emit::{js_number, js_string, js_value};
use crate::model::{Action, Entity, Event};
use tracing::debug;

const PRIMITIVES: [&str; 7] = ["box", "sphere", "cylinder", "cone", "capsule", "plane", "torus"];

/// Render setup for an entity. A `render` component overrides the archetype's
/// default primitive and colour.
pub fn generate_render(entity: &Entity, appearance: Appearance) -> String {
    let render = entity.component("render");
    let requested = render
        .and_then(|c| c.text("primitive").or_else(|| c.text("type")))
        .unwrap_or(appearance.primitive);
    let primitive = if PRIMITIVES.contains(&requested) {
        requested
    } else {
        debug!(entity = %entity.id, primitive = requested, "Unknown primitive, using box");
        "box"
    };
    let color = render
        .and_then(|c| c.text("color"))
        .unwrap_or(appearance.color);

    format!(
        r#"    entity.addComponent('render', {{ type: {primitive} }});
    (function () {{
        const material = new pc.StandardMaterial();
        material.diffuse = new pc.Color().fromString({color});
        material.update();
        entity.render.meshInstances.forEach(function (meshInstance) {{
            meshInstance.material = material;
        }});
    }})();
"#,
        primitive = js_string(primitive),
        color = js_string(color),
    )
}

fn target_expr(action: &Action) -> String {
    match action.target.as_deref() {
        Some(target) if !target.is_empty() => format!("app.root.findByName({})", js_string(target)),
        _ => "entity".to_string(),
    }
}

fn action_vec3(action: &Action, default: f64) -> String {
    let x = action.number("x").unwrap_or(default);
    let y = action.number("y").unwrap_or(default);
    let z = action.number("z").unwrap_or(default);
    format!("{}, {}, {}", js_number(x), js_number(y), js_number(z))
}

/// One action statement. Unsupported types produce a runtime warning rather than an error.
pub fn generate_action(action: &Action) -> String {
    let target = target_expr(action);
    let body = match action.action_type.to_ascii_lowercase().as_str() {
        "move" => format!("target.translateLocal({});", action_vec3(action, 0.0)),
        "rotate" => format!("target.rotateLocal({});", action_vec3(action, 0.0)),
        "scale" => format!("target.setLocalScale({});", action_vec3(action, 1.0)),
        "setproperty" => {
            let property = action
                .properties
                .get("property")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            let value = action
                .properties
                .get("value")
                .map(js_value)
                .unwrap_or_else(|| "null".to_string());
            format!("target[{}] = {};", js_string(property), value)
        }
        "emitevent" => {
            let name = action
                .properties
                .get("eventName")
                .and_then(|v| v.as_str())
                .unwrap_or("custom");
            format!("app.fire({}, target);", js_string(name))
        }
        "log" => {
            let message = action
                .properties
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            format!("console.log({});", js_string(message))
        }
        _ => format!(
            "console.warn({});",
            js_string(&format!("Unsupported action type: {}", action.action_type))
        ),
    };
    format!(
        "            (function () {{\n                const target = {target};\n                if (target) {{ {body} }}\n            }})();\n"
    )
}

/// Subscribes the event's actions to its trigger.
pub fn generate_event(event: &Event) -> String {
    let actions: String = event.actions.iter().map(generate_action).collect();
    match event.event_type.to_ascii_lowercase().as_str() {
        "onstart" => format!("    app.once('start', function () {{\n{actions}    }});\n"),
        "onclick" => format!("    entity.on('click', function () {{\n{actions}    }});\n"),
        "ontimer" => {
            let interval = event
                .properties
                .get("interval")
                .and_then(|v| v.as_f64())
                .unwrap_or(1000.0);
            format!(
                "    setInterval(function () {{\n{actions}    }}, {});\n",
                js_number(interval)
            )
        }
        _ => format!(
            "    app.on({}, function () {{\n{actions}    }});\n",
            js_string(&event.event_type)
        ),
    }
}
