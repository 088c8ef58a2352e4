//! Procedural content for the Ember renderer: seeded noise
//! generators and the texture layer built on top of them.

pub mod noise;
pub mod texture;

pub use noise::{FbmParams, PerlinNoise, SimplexNoise, ValueNoise, WorleyNoise};
pub use texture::{
    CheckerTexture, ImageTexture, NoiseEffect, NoiseTexture, SolidColor, Texture, TextureError,
};
