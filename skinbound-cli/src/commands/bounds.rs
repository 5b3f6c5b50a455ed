//! `skinbound bounds`

use anyhow::{Context, Result};
use serde::Serialize;
use skinbound::{
    BoundingVolume, BoundsOptions, BoundsOutcome, RadiusScaling, SkinnedBoundsEvaluator,
};
use std::path::Path;

use super::{add_table_row, create_table, format_vec3};
use crate::scene::Scene;

/// JSON view of one computation
#[derive(Debug, Serialize)]
struct BoundsSummary<'a> {
    mesh: &'a str,
    computed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_reason: Option<String>,
    bounds: &'a BoundingVolume,
    #[serde(skip_serializing_if = "Option::is_none")]
    root_joint: Option<&'a str>,
    root_detached: bool,
    curve_count: usize,
    skipped_channels: usize,
    max_duration: f32,
    step_count: usize,
    joint_bounds: Vec<JointSummary<'a>>,
}

#[derive(Debug, Serialize)]
struct JointSummary<'a> {
    joint: &'a str,
    bounds: &'a BoundingVolume,
}

pub fn execute(path: &Path, step_ms: f32, radius_scaling: RadiusScaling, json: bool) -> Result<()> {
    let Scene {
        tree,
        mut mesh,
        mut skin,
        animations,
    } = Scene::load(path)?;

    let evaluator = SkinnedBoundsEvaluator::new(BoundsOptions {
        step_ms,
        radius_scaling,
        ..BoundsOptions::default()
    });
    let outcome = evaluator
        .compute_bounds(&mut skin, &mut mesh, &tree, &animations)
        .with_context(|| format!("Failed to compute bounds for mesh {}", mesh.id))?;

    let report = outcome.report();
    let root_joint = match report {
        Some(report) => Some(tree.get(report.root_joint)?.id.as_str()),
        None => None,
    };
    let mut joint_bounds = Vec::with_capacity(skin.joint_bounds.len());
    for (joint, bounds) in skin.joints.iter().zip(&skin.joint_bounds) {
        joint_bounds.push(JointSummary {
            joint: tree.get(*joint)?.id.as_str(),
            bounds,
        });
    }

    let summary = BoundsSummary {
        mesh: &mesh.id,
        computed: outcome.is_computed(),
        skip_reason: match &outcome {
            BoundsOutcome::Skipped(reason) => Some(reason.to_string()),
            BoundsOutcome::Computed(_) => None,
        },
        bounds: &mesh.bounds,
        root_joint,
        root_detached: report.is_some_and(|r| r.root_detached),
        curve_count: report.map_or(0, |r| r.curve_count),
        skipped_channels: report.map_or(0, |r| r.skipped_channels),
        max_duration: report.map_or(0.0, |r| r.max_duration),
        step_count: report.map_or(0, |r| r.step_count),
        joint_bounds,
    };

    if json {
        let out = serde_json::to_string_pretty(&summary).context("Failed to serialize bounds")?;
        println!("{out}");
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn print_summary(summary: &BoundsSummary<'_>) {
    println!("Mesh: {}", summary.mesh);
    if let Some(reason) = &summary.skip_reason {
        println!("Skipped: {reason}");
        return;
    }

    println!("Root joint: {}", summary.root_joint.unwrap_or("-"));
    if summary.root_detached {
        println!("  (parent transforms excluded)");
    }
    println!(
        "Curves: {} sampled, {} skipped",
        summary.curve_count, summary.skipped_channels
    );
    println!(
        "Duration: {} over {} steps",
        summary.max_duration, summary.step_count
    );

    println!("\n=== Bounds ===");
    let mut table = create_table(&["Property", "Value"]);
    let bounds = summary.bounds;
    add_table_row(&mut table, vec!["Center".into(), format_vec3(bounds.center)]);
    add_table_row(&mut table, vec!["Radius".into(), format!("{:.4}", bounds.radius)]);
    add_table_row(&mut table, vec!["Min".into(), format_vec3(bounds.min)]);
    add_table_row(&mut table, vec!["Max".into(), format_vec3(bounds.max)]);
    table.printstd();

    if !summary.joint_bounds.is_empty() {
        println!("\n=== Joint Bounds ===");
        let mut table = create_table(&["Joint", "Center", "Radius"]);
        for joint in &summary.joint_bounds {
            let radius = if joint.bounds.is_empty() {
                "empty".to_string()
            } else {
                format!("{:.4}", joint.bounds.radius)
            };
            add_table_row(
                &mut table,
                vec![
                    joint.joint.to_string(),
                    format_vec3(joint.bounds.center),
                    radius,
                ],
            );
        }
        table.printstd();
    }
}
