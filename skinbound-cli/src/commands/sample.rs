//! `skinbound sample`

use anyhow::{Context, Result, bail};
use serde::Serialize;
use skinbound::Srt;
use std::path::Path;

use super::{add_table_row, create_table, format_vec3};
use crate::scene::Scene;

#[derive(Debug, Serialize)]
struct ChannelSamples<'a> {
    animation: &'a str,
    target: &'a str,
    key_count: usize,
    duration: f32,
    samples: Vec<TimedSrt>,
}

#[derive(Debug, Serialize)]
struct TimedSrt {
    time: f32,
    #[serde(flatten)]
    srt: Srt,
}

pub fn execute(path: &Path, target: &str, samples: usize, json: bool) -> Result<()> {
    if samples == 0 {
        bail!("At least one sample is required");
    }

    let scene = Scene::load(path)?;
    scene
        .tree
        .resolve(target)
        .with_context(|| format!("No node to sample in {}", path.display()))?;

    let mut sampled = Vec::new();
    for animation in scene.animations.iter() {
        for channel in animation.channels.iter().filter(|c| c.target_id == target) {
            let curve = match channel.srt_curve() {
                Ok(curve) => curve,
                Err(skip) => {
                    log::warn!(
                        "Skipping channel of animation {} targeting {}: {}",
                        animation.id,
                        target,
                        skip
                    );
                    continue;
                }
            };

            let points = (0..samples)
                .map(|i| {
                    let time = if samples == 1 {
                        0.0
                    } else {
                        i as f32 / (samples - 1) as f32
                    };
                    TimedSrt {
                        time,
                        srt: curve.evaluate(time),
                    }
                })
                .collect();

            sampled.push(ChannelSamples {
                animation: &animation.id,
                target,
                key_count: channel.key_count(),
                duration: channel.duration(),
                samples: points,
            });
        }
    }

    if sampled.is_empty() {
        log::warn!("No scale/rotate/translate channels target {target}");
    }

    if json {
        let out = serde_json::to_string_pretty(&sampled).context("Failed to serialize samples")?;
        println!("{out}");
        return Ok(());
    }

    for channel in &sampled {
        println!(
            "\n=== {} -> {} ({} keys, duration {}) ===",
            channel.animation, channel.target, channel.key_count, channel.duration
        );
        let mut table = create_table(&["Time", "Scale", "Rotation", "Translation"]);
        for sample in &channel.samples {
            let q = sample.srt.rotation;
            add_table_row(
                &mut table,
                vec![
                    format!("{:.4}", sample.time),
                    format_vec3(sample.srt.scale),
                    format!("({:.4}, {:.4}, {:.4}, {:.4})", q.x, q.y, q.z, q.w),
                    format_vec3(sample.srt.translation),
                ],
            );
        }
        table.printstd();
    }

    Ok(())
}
