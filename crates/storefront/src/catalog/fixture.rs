//! Built-in artwork fixture served when no catalog file is configured.

use atelier_core::{Artwork, ArtworkId, Price};

const ARTIST: &str = "Contemporary Artist";

struct Seed {
    id: &'static str,
    image: &'static str,
    title: &'static str,
    price: u32,
    description: &'static str,
    medium: &'static str,
    dimensions: &'static str,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "1",
        image: "/img_01.jpg",
        title: "Color of Folks",
        price: 850,
        description: "A vibrant exploration of human connection through bold colors and expressive forms. This piece captures the essence of community and shared experiences.",
        medium: "Acrylic on Canvas",
        dimensions: "60 x 80 cm",
    },
    Seed {
        id: "2",
        image: "/img_02.jpg",
        title: "Abstract Dreams",
        price: 1200,
        description: "An ethereal composition that blurs the line between reality and imagination. This abstract work invites viewers to interpret their own narratives.",
        medium: "Mixed Media",
        dimensions: "80 x 100 cm",
    },
    Seed {
        id: "3",
        image: "/img_03.jpg",
        title: "Urban Symphony",
        price: 950,
        description: "A dynamic representation of city life, where architecture and movement converge in a harmonious visual rhythm.",
        medium: "Oil on Canvas",
        dimensions: "70 x 90 cm",
    },
    Seed {
        id: "4",
        image: "/img_04.jpg",
        title: "Nature's Whisper",
        price: 1100,
        description: "A serene meditation on the natural world, capturing the quiet beauty and subtle details of the environment around us.",
        medium: "Watercolor on Paper",
        dimensions: "50 x 70 cm",
    },
];

/// The four artworks the shop ships with.
pub fn artworks() -> Vec<Artwork> {
    SEEDS
        .iter()
        .map(|seed| Artwork {
            id: ArtworkId::new(seed.id),
            image: seed.image.to_string(),
            title: seed.title.to_string(),
            price: Price::from_units(seed.price),
            description: Some(seed.description.to_string()),
            artist: Some(ARTIST.to_string()),
            year: Some(2024),
            medium: Some(seed.medium.to_string()),
            dimensions: Some(seed.dimensions.to_string()),
        })
        .collect()
}
