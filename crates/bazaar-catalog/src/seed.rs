//! Sample listings shown on a fresh board.

use bazaar_types::{Listing, ListingId, Timestamp};

struct Sample {
    title: &'static str,
    author: &'static str,
    category: &'static str,
    condition: &'static str,
    price: f64,
    description: &'static str,
    contact: &'static str,
    image: &'static str,
}

const SAMPLES: [Sample; 6] = [
    Sample {
        title: "Engineering Mathematics",
        author: "B.S. Grewal",
        category: "Engineering",
        condition: "Good",
        price: 250.0,
        description: "Complete book with all chapters. Minor highlighting present.",
        contact: "+91 98765 43210",
        image: "https://images.unsplash.com/photo-1509228468518-180dd4864904?w=500",
    },
    Sample {
        title: "The Great Gatsby",
        author: "F. Scott Fitzgerald",
        category: "Novels",
        condition: "Like New",
        price: 150.0,
        description: "Classic novel in excellent condition.",
        contact: "+91 98765 43211",
        image: "https://images.unsplash.com/photo-1544947950-fa07a98d237f?w=500",
    },
    Sample {
        title: "Organic Chemistry",
        author: "Morrison & Boyd",
        category: "Science",
        condition: "Fair",
        price: 300.0,
        description: "Used for one semester. All topics covered.",
        contact: "+91 98765 43212",
        image: "https://images.unsplash.com/photo-1532012197267-da84d127e765?w=500",
    },
    Sample {
        title: "Financial Accounting",
        author: "R.L. Gupta",
        category: "Commerce",
        condition: "Good",
        price: 200.0,
        description: "Perfect for CA students.",
        contact: "+91 98765 43213",
        image: "https://images.unsplash.com/photo-1554224155-8d04cb21cd6c?w=500",
    },
    Sample {
        title: "Gray's Anatomy",
        author: "Henry Gray",
        category: "Medical",
        condition: "New",
        price: 800.0,
        description: "Brand new, never used.",
        contact: "+91 98765 43214",
        image: "https://images.unsplash.com/photo-1576091160399-112ba8d25d1d?w=500",
    },
    Sample {
        title: "To Kill a Mockingbird",
        author: "Harper Lee",
        category: "Novels",
        condition: "Like New",
        price: 120.0,
        description: "Beautiful edition, read once.",
        contact: "+91 98765 43215",
        image: "https://images.unsplash.com/photo-1512820790803-83ca734da794?w=500",
    },
];

/// The sample listings, ids 1 through 6, the n-th posted n days before `now`.
pub fn sample_listings(now: Timestamp) -> Vec<Listing> {
    SAMPLES
        .iter()
        .zip(1u64..)
        .map(|(s, n)| Listing {
            id: ListingId::new(n),
            title: s.title.into(),
            author: s.author.into(),
            category: s.category.into(),
            condition: s.condition.into(),
            price: s.price,
            description: s.description.into(),
            contact: s.contact.into(),
            image: s.image.into(),
            timestamp: now.days_before(n),
        })
        .collect()
}
