// src/main.rs
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use tracing::info;

use dockpanel_core::{Dimension, Dock, PanelConfig, PanelId, SurfaceBackend};
use dockpanel_runtime::DockRuntime;
use dockpanel_surface::HeadlessBackend;

#[derive(Parser)]
#[command(name = "dockpanel")]
#[command(about = "Lay out a panel configuration and print the computed tree")]
struct Args {
    /// Path to a JSON panel configuration. A built-in sample layout is used
    /// when omitted.
    config: Option<String>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1024.0)]
    width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 768.0)]
    height: f32,

    /// Promote the root panel to a full-viewport overlay before layout
    #[arg(long)]
    fullscreen: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let config = match &args.config {
        Some(path) => {
            if !Path::new(path).exists() {
                anyhow::bail!("config file not found: {path}");
            }
            let text =
                fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("Failed to parse {path}"))?
        }
        None => sample_config(),
    };

    let backend = HeadlessBackend::new(Vec2::new(args.width, args.height));
    let mut runtime = DockRuntime::new(backend);
    let root = runtime.insert(config);

    if args.fullscreen {
        runtime.make_fullscreen(root)?;
    } else {
        runtime.update(root);
    }

    info!(
        "laid out {} panels at {}x{}",
        runtime.tree().len(),
        args.width,
        args.height
    );

    let mut output = String::new();
    render_panel_tree(&mut output, &runtime, root, 0);
    print!("{output}");

    Ok(())
}

/// A typical application shell: header, footer, sidebar, workspace.
fn sample_config() -> PanelConfig {
    PanelConfig::new()
        .named("shell")
        .content("workspace")
        .child(
            PanelConfig::new()
                .named("header")
                .dock(Dock::Top)
                .height(Dimension::Pixels(56.0)),
        )
        .child(
            PanelConfig::new()
                .named("footer")
                .dock(Dock::Bottom)
                .height(Dimension::Pixels(32.0)),
        )
        .child(
            PanelConfig::new()
                .named("sidebar")
                .dock(Dock::Left)
                .width(Dimension::Percent(20.0)),
        )
}

fn render_panel_tree(
    output: &mut String,
    runtime: &DockRuntime<HeadlessBackend>,
    id: PanelId,
    depth: usize,
) {
    let Some(panel) = runtime.tree().get(id) else {
        return;
    };
    let indent = "  ".repeat(depth);
    let backend = runtime.backend();

    let size = backend.measure(panel.surface);
    let position = backend.position(panel.surface).unwrap_or(Vec2::ZERO);
    let name = panel.name.as_deref().unwrap_or("panel");
    output.push_str(&format!(
        "{indent}{name} [dock {:?}] at ({}, {}) size {}x{}{}\n",
        panel.dock,
        position.x,
        position.y,
        size.x,
        size.y,
        if panel.hidden { " (hidden)" } else { "" },
    ));

    if let Some(content) = panel.content {
        let content_size = backend.measure(content);
        let content_position = backend.position(content).unwrap_or(Vec2::ZERO);
        output.push_str(&format!(
            "{indent}  content at ({}, {}) size {}x{}\n",
            content_position.x, content_position.y, content_size.x, content_size.y
        ));
    }

    for &child in &panel.children {
        render_panel_tree(output, runtime, child, depth + 1);
    }
}
