//! End-to-end skinned bounds computation

use glam::{Mat4, Quat, Vec3};
use pretty_assertions::assert_eq;
use skinbound::{
    Animation, AnimationChannel, Animations, BoundingVolume, BoundsOptions, Mesh, MeshSkin,
    NodeId, NodeTree, RadiusScaling, SkinnedBoundsEvaluator, Srt, TargetAttribute, Vertex,
};

use crate::init_logging;

/// Two joints under a far-away scene node; `b` is a child of `a`
struct Rig {
    tree: NodeTree,
    skin: MeshSkin,
    mesh: Mesh,
    scene: NodeId,
    b: NodeId,
}

fn rig() -> Rig {
    let mut tree = NodeTree::new();
    let scene = tree.add_node("scene", Mat4::from_translation(Vec3::new(100.0, 0.0, 0.0)));
    let a = tree.add_node("a", Mat4::IDENTITY);
    let b = tree.add_node("b", Mat4::IDENTITY);
    tree.add_child(scene, a).unwrap();
    tree.add_child(a, b).unwrap();

    let mut skin = MeshSkin::default();
    skin.add_joint(a, Mat4::IDENTITY);
    skin.add_joint(b, Mat4::IDENTITY);

    let mut mesh = Mesh::new("body", Mesh::skinned_format());
    mesh.vertices = vec![
        Vertex::rigid(Vec3::new(-0.5, 0.0, 0.0), 0),
        Vertex::rigid(Vec3::new(0.5, 0.0, 0.0), 0),
        Vertex::rigid(Vec3::new(-0.5, 0.0, 0.0), 1),
        Vertex::rigid(Vec3::new(0.5, 0.0, 0.0), 1),
    ];

    Rig {
        tree,
        skin,
        mesh,
        scene,
        b,
    }
}

fn translate_b(duration: f32) -> Animations {
    let end = Srt::new(Vec3::ONE, Quat::IDENTITY, Vec3::new(10.0, 0.0, 0.0));
    let mut walk = Animation::new("walk");
    walk.add_channel(AnimationChannel::srt("b", &[(0.0, Srt::IDENTITY), (duration, end)]));
    vec![walk].into()
}

#[test]
fn test_single_joint_without_animation_uses_bind_pose() {
    let mut tree = NodeTree::new();
    let joint = tree.add_node("joint", Mat4::IDENTITY);
    let mut skin = MeshSkin::default();
    skin.add_joint(joint, Mat4::IDENTITY);

    let positions = [
        Vec3::new(-1.0, 0.0, 2.0),
        Vec3::new(3.0, 1.0, 0.0),
        Vec3::new(0.0, -2.0, 1.0),
    ];
    let mut mesh = Mesh::new("rock", Mesh::skinned_format());
    mesh.vertices = positions.iter().map(|p| Vertex::rigid(*p, 0)).collect();

    let outcome = SkinnedBoundsEvaluator::default()
        .compute_bounds(&mut skin, &mut mesh, &tree, &Animations::new())
        .unwrap();

    let report = outcome.report().unwrap();
    assert_eq!(report.step_count, 1);
    assert_eq!(report.curve_count, 0);
    assert_eq!(mesh.bounds, BoundingVolume::from_points(positions));
}

#[test]
fn test_translated_joint_reaches_final_key() {
    init_logging();
    let Rig {
        tree,
        mut skin,
        mut mesh,
        ..
    } = rig();

    let outcome = SkinnedBoundsEvaluator::default()
        .compute_bounds(&mut skin, &mut mesh, &tree, &translate_b(1.0))
        .unwrap();
    let report = outcome.report().unwrap();

    // t = 0 and the clamped final step at t = 1
    assert_eq!(report.step_count, 2);
    assert_eq!(report.curve_count, 1);
    assert!(report.root_detached);

    // The scene node's translation is excluded
    assert!((mesh.bounds.min.x + 0.5).abs() < 1e-5);
    assert!((mesh.bounds.max.x - 10.5).abs() < 1e-5);
    assert!(mesh.bounds.sphere_contains(Vec3::new(10.5, 0.0, 0.0)));
    assert!(mesh.bounds.sphere_contains(Vec3::new(-0.5, 0.0, 0.0)));
}

#[test]
fn test_step_count_follows_duration() {
    let Rig {
        tree,
        mut skin,
        mut mesh,
        ..
    } = rig();

    let outcome = SkinnedBoundsEvaluator::default()
        .compute_bounds(&mut skin, &mut mesh, &tree, &translate_b(1000.0))
        .unwrap();
    let report = outcome.report().unwrap();

    // 0, 33, ..., 990, then the clamped step at 1000
    assert_eq!(report.step_count, 32);
    assert_eq!(report.max_duration, 1000.0);
    assert!((mesh.bounds.max.x - 10.5).abs() < 1e-5);
}

#[test]
fn test_compute_bounds_is_idempotent() {
    init_logging();
    let Rig {
        tree,
        mut skin,
        mut mesh,
        ..
    } = rig();
    let animations = translate_b(500.0);
    let tree_before = tree.clone();
    let evaluator = SkinnedBoundsEvaluator::default();

    let first = evaluator
        .compute_bounds(&mut skin, &mut mesh, &tree, &animations)
        .unwrap();
    let first_bounds = mesh.bounds;
    let second = evaluator
        .compute_bounds(&mut skin, &mut mesh, &tree, &animations)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(mesh.bounds, first_bounds);
    assert_eq!(tree, tree_before);
}

#[test]
fn test_rotation_sweeps_bounds() {
    let Rig {
        tree,
        mut skin,
        mut mesh,
        ..
    } = rig();

    let quarter = Srt::new(
        Vec3::ONE,
        Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        Vec3::ZERO,
    );
    let mut spin = Animation::new("spin");
    spin.add_channel(AnimationChannel::srt("b", &[(0.0, Srt::IDENTITY), (330.0, quarter)]));
    let animations: Animations = vec![spin].into();

    SkinnedBoundsEvaluator::default()
        .compute_bounds(&mut skin, &mut mesh, &tree, &animations)
        .unwrap();

    // Joint b's vertices end up along the y axis
    assert!(mesh.bounds.max.y >= 0.5 - 1e-5);
    assert!(mesh.bounds.min.y <= -0.5 + 1e-5);
}

#[test]
fn test_unsupported_and_foreign_channels() {
    let Rig {
        tree,
        mut skin,
        mut mesh,
        ..
    } = rig();

    let mut mixed = Animation::new("mixed");
    mixed.add_channel(AnimationChannel::new(
        "b",
        TargetAttribute::Translate,
        vec![0.0, 100.0],
        vec![0.0, 0.0, 0.0, 50.0, 0.0, 0.0],
    ));
    mixed.add_channel(AnimationChannel::srt(
        "scene",
        &[
            (0.0, Srt::IDENTITY),
            (
                100.0,
                Srt::new(Vec3::ONE, Quat::IDENTITY, Vec3::splat(1000.0)),
            ),
        ],
    ));
    mixed.add_channel(AnimationChannel::srt("a", &[(7.0, Srt::IDENTITY), (7.0, Srt::IDENTITY)]));
    let animations: Animations = vec![mixed].into();

    let outcome = SkinnedBoundsEvaluator::default()
        .compute_bounds(&mut skin, &mut mesh, &tree, &animations)
        .unwrap();
    let report = outcome.report().unwrap();

    assert_eq!(report.curve_count, 0);
    assert_eq!(report.skipped_channels, 2);
    assert_eq!(report.step_count, 1);
    assert!((mesh.bounds.max.x - 0.5).abs() < 1e-5);
}

#[test]
fn test_joint_without_vertices_is_ignored() {
    let Rig {
        mut tree,
        mut skin,
        mut mesh,
        b,
        ..
    } = rig();
    let tip = tree.add_node("tip", Mat4::from_translation(Vec3::new(50.0, 0.0, 0.0)));
    tree.add_child(b, tip).unwrap();
    skin.add_joint(tip, Mat4::IDENTITY);

    SkinnedBoundsEvaluator::default()
        .compute_bounds(&mut skin, &mut mesh, &tree, &Animations::new())
        .unwrap();

    assert!(skin.joint_bounds[2].is_empty());
    assert!((mesh.bounds.max.x - 0.5).abs() < 1e-5);
}

#[test]
fn test_translation_radius_scaling() {
    let Rig {
        mut tree,
        mut skin,
        mut mesh,
        scene,
        ..
    } = rig();
    tree.set_transform_matrix(scene, Mat4::IDENTITY).unwrap();
    let a = skin.joints[0];
    tree.set_transform_matrix(a, Mat4::from_translation(Vec3::new(0.0, 3.0, 0.0)))
        .unwrap();

    let evaluator = SkinnedBoundsEvaluator::new(BoundsOptions {
        radius_scaling: RadiusScaling::Translation,
        ..BoundsOptions::default()
    });
    evaluator
        .compute_bounds(&mut skin, &mut mesh, &tree, &Animations::new())
        .unwrap();
    // Both joints sit at y = 3; the radius is scaled by the translation
    assert!((mesh.bounds.radius - 1.5).abs() < 1e-5);

    SkinnedBoundsEvaluator::default()
        .compute_bounds(&mut skin, &mut mesh, &tree, &Animations::new())
        .unwrap();
    assert!((mesh.bounds.radius - 0.5).abs() < 1e-5);
}

#[test]
fn test_vertices_at_origin_follow_translated_joint() {
    init_logging();
    let mut tree = NodeTree::new();
    let a = tree.add_node("a", Mat4::IDENTITY);
    let b = tree.add_node("b", Mat4::IDENTITY);
    tree.add_child(a, b).unwrap();

    let mut skin = MeshSkin::default();
    skin.add_joint(a, Mat4::IDENTITY);
    skin.add_joint(b, Mat4::IDENTITY);

    // Half the vertices on each joint, all at the local origin
    let mut mesh = Mesh::new("dots", Mesh::skinned_format());
    mesh.vertices = vec![
        Vertex::rigid(Vec3::ZERO, 0),
        Vertex::rigid(Vec3::ZERO, 0),
        Vertex::rigid(Vec3::ZERO, 1),
        Vertex::rigid(Vec3::ZERO, 1),
    ];

    let outcome = SkinnedBoundsEvaluator::default()
        .compute_bounds(&mut skin, &mut mesh, &tree, &translate_b(1.0))
        .unwrap();

    assert!(outcome.is_computed());
    assert!(!skin.joint_bounds[0].is_empty());
    assert!(!skin.joint_bounds[1].is_empty());
    assert_eq!(mesh.bounds.min, Vec3::ZERO);
    assert_eq!(mesh.bounds.max, Vec3::new(10.0, 0.0, 0.0));
    assert!((mesh.bounds.radius - 5.0).abs() < 1e-5);
    assert!(mesh.bounds.sphere_contains(Vec3::ZERO));
    assert!(mesh.bounds.sphere_contains(Vec3::new(10.0, 0.0, 0.0)));
}
