//! Assembles the standalone HTML document around the generated scene script.

use crate::emit::{js_number, js_string};
use crate::mode::GameMode;
use crate::model::{Camera, Light, Space, Transform};
use itertools::Itertools;

pub const DEFAULT_MULTIPLAYER_SERVER_URL: &str = "ws://localhost:2567";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#05070f";

/// Escapes text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn place(name: &str, transform: &Transform) -> String {
    let p = transform.position;
    let r = transform.rotation;
    format!(
        "    {name}.setLocalPosition({}, {}, {});\n    {name}.setLocalEulerAngles({}, {}, {});\n",
        js_number(p.x),
        js_number(p.y),
        js_number(p.z),
        js_number(r.x),
        js_number(r.y),
        js_number(r.z),
    )
}

/// The space's first camera, or a default one looking at the origin.
pub fn generate_camera(space: &Space) -> String {
    let clear = space
        .background_color
        .as_deref()
        .unwrap_or(DEFAULT_BACKGROUND_COLOR);
    let (camera, transform) = match space.cameras.first() {
        Some(camera) => (camera.clone(), camera.transform),
        None => {
            let mut transform = Transform::default();
            transform.position.z = 30.0;
            (Camera::default(), transform)
        }
    };
    let mut options = vec![format!("clearColor: new pc.Color().fromString({})", js_string(clear))];
    if let Some(fov) = camera.fov {
        options.push(format!("fov: {}", js_number(fov)));
    }
    if let Some(near) = camera.near {
        options.push(format!("nearClip: {}", js_number(near)));
    }
    if let Some(far) = camera.far {
        options.push(format!("farClip: {}", js_number(far)));
    }
    format!(
        "    const camera = new pc.Entity('Camera');\n    camera.addComponent('camera', {{ {} }});\n{}    app.root.addChild(camera);\n",
        options.iter().join(", "),
        place("camera", &transform),
    )
}

fn generate_light(index: usize, light: &Light) -> String {
    let var = format!("light{}", index);
    let mut options = vec![format!("type: {}", js_string(&light.light_type))];
    if let Some(color) = &light.color {
        options.push(format!("color: new pc.Color().fromString({})", js_string(color)));
    }
    if let Some(intensity) = light.intensity {
        options.push(format!("intensity: {}", js_number(intensity)));
    }
    format!(
        "    const {var} = new pc.Entity({});\n    {var}.addComponent('light', {{ {} }});\n{}    app.root.addChild({var});\n",
        js_string(&light.name),
        options.iter().join(", "),
        place(&var, &light.transform),
    )
}

/// The space's lights, or a single directional light when none is declared.
pub fn generate_lights(space: &Space) -> String {
    if space.lights.is_empty() {
        let mut transform = Transform::default();
        transform.rotation.x = 45.0;
        transform.rotation.y = 30.0;
        let light = Light {
            name: "Light".to_string(),
            light_type: "directional".to_string(),
            transform,
            ..Light::default()
        };
        return generate_light(0, &light);
    }
    space
        .lights
        .iter()
        .enumerate()
        .map(|(i, light)| generate_light(i, light))
        .collect()
}

fn auth_overlay(server_url: &str) -> String {
    format!(
        r#"    <div id="updl-auth">
        <form id="updl-auth-form" data-server="{server}">
            <h2>Enter your name</h2>
            <input id="updl-player-name" name="playerName" type="text" required maxlength="32" autocomplete="nickname">
            <button type="submit">Play</button>
        </form>
    </div>
"#,
        server = escape_html(server_url),
    )
}

/// Inputs of [`render_document`].
pub struct Document<'a> {
    pub title: &'a str,
    pub playcanvas_url: &'a str,
    pub mode: GameMode,
    pub server_url: &'a str,
    pub systems_script: &'a str,
    pub scene_script: &'a str,
}

/// Renders the full HTML page. In multiplayer mode the application only starts
/// after the player submitted the auth form.
pub fn render_document(doc: &Document<'_>) -> String {
    let (overlay, start) = match doc.mode {
        GameMode::SinglePlayer => (String::new(), "app.start();".to_string()),
        GameMode::Multiplayer => (
            auth_overlay(doc.server_url),
            r#"const authForm = document.getElementById('updl-auth-form');
    authForm.addEventListener('submit', function (event) {
        event.preventDefault();
        const playerName = document.getElementById('updl-player-name').value.trim();
        if (!playerName) {
            return;
        }
        window.UPDL_SESSION = { playerName: playerName, serverUrl: authForm.dataset.server };
        document.getElementById('updl-auth').remove();
        app.fire('multiplayer:join', window.UPDL_SESSION);
        app.start();
    });"#
                .to_string(),
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="generator" content="updl {version}">
    <title>{title}</title>
    <style>
        html, body {{ margin: 0; height: 100%; overflow: hidden; background: #000; }}
        #application-canvas {{ width: 100%; height: 100%; display: block; }}
        #updl-notice {{ position: absolute; top: 16px; left: 50%; transform: translateX(-50%); color: #fff; font-family: sans-serif; opacity: 0; transition: opacity 0.3s; }}
        #updl-auth {{ position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; background: rgba(0, 0, 0, 0.8); color: #fff; font-family: sans-serif; }}
    </style>
    <script src="{playcanvas}"></script>
</head>
<body>
    <canvas id="application-canvas"></canvas>
    <div id="updl-notice"></div>
{overlay}    <script>
{systems}
(function () {{
    const canvas = document.getElementById('application-canvas');
    const app = new pc.Application(canvas, {{
        mouse: new pc.Mouse(canvas),
        keyboard: new pc.Keyboard(window)
    }});
    app.setCanvasFillMode(pc.FILLMODE_FILL_WINDOW);
    app.setCanvasResolution(pc.RESOLUTION_AUTO);
    window.addEventListener('resize', function () {{
        app.resizeCanvas();
    }});
    window.SpaceHelpers.install(app);

{scene}
    {start}
}})();
    </script>
</body>
</html>
"#,
        version = env!("CARGO_PKG_VERSION"),
        title = escape_html(doc.title),
        playcanvas = escape_html(doc.playcanvas_url),
        overlay = overlay,
        systems = doc.systems_script,
        scene = doc.scene_script,
        start = start,
    )
}
