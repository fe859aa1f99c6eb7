#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use ray_lod::euclid::{point2, point3, size2, vec2, vec3};
use ray_lod::math::WorldVector;
use ray_lod::{
    ConeEncoding, DifferentialMethod, FullPrecision, HitTriangle, Igehy, PackedHalf, RayCone,
    RayDiff, RayTracingGems,
};

fn triangle() -> HitTriangle {
    HitTriangle::new(
        [
            point3(-10.0, -10.0, -5.0),
            point3(10.0, -10.0, -5.0),
            point3(-10.0, 10.0, -5.0),
        ],
        [point2(0.1, 0.2), point2(0.9, 0.3), point2(0.2, 0.7)],
        [
            vec3(0.3, 0.0, 1.0).normalize(),
            vec3(-0.3, 0.2, 1.0).normalize(),
            vec3(0.0, -0.3, 1.0).normalize(),
        ],
    )
}

fn cone_bench<E: ConeEncoding>(c: &mut Criterion, name: &str) {
    let normal = vec3(0.0, 0.0, 1.0);
    let ray_dir: WorldVector = vec3(0.1, 0.2, -1.0).normalize();

    c.bench_function(&format!("cone {name}: propagate"), |b| {
        let cone = RayCone::<E>::new(0.5, 0.01);
        b.iter(|| black_box(cone).propagate(black_box(0.02), black_box(3.0)))
    });

    c.bench_function(&format!("cone {name}: compute_lod"), |b| {
        let cone = RayCone::<E>::new(0.5, 0.01);
        b.iter(|| {
            black_box(cone).compute_lod(
                black_box(-1.5),
                black_box(ray_dir),
                black_box(normal),
                size2(1024, 512),
            )
        })
    });
}

fn differential_bench<M: DifferentialMethod>(c: &mut Criterion) {
    let name = M::NAME;
    let triangle = triangle();
    let non_normalized: WorldVector = vec3(-0.2, -0.25, -1.0);
    let ray_dir = non_normalized.normalize();
    let hit_t = -5.0 / ray_dir.z;
    let primary = RayDiff::<M>::for_primary_ray(
        non_normalized,
        vec3(0.5, 0.0, 0.0),
        vec3(0.0, 0.5, 0.0),
        size2(1920.0, 1080.0),
    );
    let propagated = primary.propagate(ray_dir, hit_t, triangle.face_normal());
    let surface = propagated.surface_differentials(ray_dir, &triangle, hit_t);
    let n_raw = triangle.interpolated_normal(vec2(0.3, 0.4));
    let normal = n_raw.normalize();

    c.bench_function(&format!("diff {name}: propagate"), |b| {
        b.iter(|| {
            black_box(primary).propagate(
                black_box(ray_dir),
                black_box(hit_t),
                triangle.face_normal(),
            )
        })
    });

    c.bench_function(&format!("diff {name}: surface_differentials"), |b| {
        b.iter(|| black_box(propagated).surface_differentials(ray_dir, black_box(&triangle), hit_t))
    });

    c.bench_function(&format!("diff {name}: reflect"), |b| {
        b.iter(|| {
            black_box(propagated).reflect(
                ray_dir,
                black_box(n_raw),
                normal,
                black_box(&surface),
                &triangle,
            )
        })
    });
}

pub fn lod_bench(c: &mut Criterion) {
    cone_bench::<FullPrecision>(c, "full");
    cone_bench::<PackedHalf>(c, "half");
    differential_bench::<Igehy>(c);
    differential_bench::<RayTracingGems>(c);
}

criterion_group!(benches, lod_bench);
criterion_main!(benches);
