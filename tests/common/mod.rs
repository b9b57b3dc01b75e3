// Shared module tree for host-side tests.
// The main crate is wasm-only, so the pure-Rust scene modules are included
// directly under a wrapper that mirrors `src/core`.

#![allow(dead_code)]

pub mod scene_core {
    pub mod constants {
        include!("../../src/core/constants.rs");
    }
    pub mod tween {
        include!("../../src/core/tween.rs");
    }
    pub mod phase {
        include!("../../src/core/phase.rs");
    }
    pub mod camera {
        include!("../../src/core/camera.rs");
    }
    pub mod crop {
        include!("../../src/core/crop.rs");
    }
    pub mod atlas {
        include!("../../src/core/atlas.rs");
    }
    pub mod catalog {
        include!("../../src/core/catalog.rs");
    }
    pub mod error {
        include!("../../src/core/error.rs");
    }
    pub mod field {
        include!("../../src/core/field.rs");
    }
    pub mod picking {
        include!("../../src/core/picking.rs");
    }
    pub mod scene {
        include!("../../src/core/scene.rs");
    }
}

use rand::rngs::StdRng;
use rand::SeedableRng;
use scene_core::field::ParticleField;

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn field(count: usize, images: usize) -> ParticleField {
    match ParticleField::build(count, 2.0, images, &mut seeded(7)) {
        Ok(f) => f,
        Err(e) => panic!("field build failed: {e}"),
    }
}
