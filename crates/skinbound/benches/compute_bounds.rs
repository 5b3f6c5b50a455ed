use criterion::{Criterion, criterion_group, criterion_main};
use glam::{Mat4, Quat, Vec3};
use skinbound::{
    Animation, AnimationChannel, Animations, Interpolation, Mesh, MeshSkin, NodeTree,
    SkinnedBoundsEvaluator, Srt, SrtCurve, Vertex,
};

const JOINTS: usize = 24;
const VERTICES_PER_JOINT: usize = 200;

/// A chain of joints, each with a ring of vertices and a 2 second swing
fn create_test_rig() -> (NodeTree, MeshSkin, Mesh, Animations) {
    let mut tree = NodeTree::new();
    let mut skin = MeshSkin::default();
    let mut mesh = Mesh::new("chain", Mesh::skinned_format());
    let mut animation = Animation::new("swing");

    let mut parent = None;
    for j in 0..JOINTS {
        let name = format!("joint{j}");
        let joint = tree.add_node(name.clone(), Mat4::from_translation(Vec3::Y));
        if let Some(parent) = parent {
            tree.add_child(parent, joint).unwrap();
        }
        parent = Some(joint);
        skin.add_joint(joint, Mat4::IDENTITY);

        for v in 0..VERTICES_PER_JOINT {
            let angle = v as f32 / VERTICES_PER_JOINT as f32 * std::f32::consts::TAU;
            let position = Vec3::new(angle.cos(), j as f32, angle.sin());
            mesh.vertices.push(Vertex::rigid(position, j as u32));
        }

        let swing = Srt::new(Vec3::ONE, Quat::from_rotation_z(0.3), Vec3::Y);
        let rest = Srt::new(Vec3::ONE, Quat::IDENTITY, Vec3::Y);
        animation.add_channel(AnimationChannel::srt(
            name,
            &[(0.0, rest), (1000.0, swing), (2000.0, rest)],
        ));
    }

    (tree, skin, mesh, vec![animation].into())
}

fn bench_compute_bounds(c: &mut Criterion) {
    let (tree, mut skin, mut mesh, animations) = create_test_rig();
    let evaluator = SkinnedBoundsEvaluator::default();

    c.bench_function("compute_bounds", |b| {
        b.iter(|| {
            evaluator
                .compute_bounds(&mut skin, &mut mesh, &tree, &animations)
                .unwrap()
        })
    });
}

fn bench_curve_evaluate(c: &mut Criterion) {
    let mut curve = SrtCurve::new(64);
    for i in 0..64 {
        let t = i as f32 / 63.0;
        let srt = Srt::new(
            Vec3::splat(1.0 + t),
            Quat::from_rotation_y(t * 3.0),
            Vec3::new(t * 10.0, 0.0, 0.0),
        );
        curve.set_key(i, t, &srt, Interpolation::Smooth);
    }

    c.bench_function("srt_curve_evaluate", |b| {
        let mut t = 0.0_f32;
        b.iter(|| {
            t = (t + 0.0137) % 1.0;
            curve.evaluate(t)
        })
    });
}

criterion_group!(benches, bench_compute_bounds, bench_curve_evaluate);
criterion_main!(benches);
