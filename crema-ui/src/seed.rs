//! Deterministic mock data for demos and tests
//!
//! The journal has no backend, so the store starts from generated content.
//! Generation is seeded: the same seed always yields the same feed.

use chrono::{DateTime, Duration, Utc};
use crema_common::chat::{ChatMessage, ChatPeer, ChatSession, MessageKind};
use crema_common::comments::{Comment, CommentBody};
use crema_common::models::{Author, Badge, Post, User, UserStats};
use crema_common::FlavorProfile;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of generated feed posts
pub const MOCK_POST_COUNT: usize = 30;

pub const REGIONS: [&str; 4] = ["Africa", "Asia", "Americas", "Oceania"];
pub const METHODS: [&str; 5] = ["Pour Over", "Espresso", "Cold Brew", "Flat White", "Latte"];

const ORIGINS: [&str; 7] = [
    "Kenya",
    "Ethiopia",
    "Yunnan",
    "Panama",
    "Brazil",
    "Guatemala",
    "Colombia",
];
const VARIETAL_TAGS: [&str; 6] = ["geisha", "bourbon", "typica", "sl28", "caturra", "catuai"];
const DISTRICTS: [&str; 4] = ["Jing'an", "Xuhui", "Changning", "Putuo"];

const IMAGE_POUR_OVER: &str = "https://images.unsplash.com/photo-1521017432531-fbd92d744264";
const IMAGE_MILK: &str = "https://images.unsplash.com/photo-1501339847302-ac426a4a7cbb";
const IMAGE_COLD_BREW: &str = "https://images.unsplash.com/photo-1514432324607-a09d9b4aefdd";
const IMAGE_DEFAULT: &str = "https://images.unsplash.com/photo-1447933630913-bb796f287e05";

/// The signed-in user
pub fn mock_user() -> User {
    User {
        id: "me".to_string(),
        name: "Ai CoffeeLover".to_string(),
        avatar: "https://images.unsplash.com/photo-1544005313-94ddf0286df2?w=200".to_string(),
        bio: "Chasing the perfect floral cup. Shanghai specialty coffee enthusiast.".to_string(),
        stats: UserStats {
            posts: 30,
            followers: 856,
            following: 120,
        },
        palate_score: 45,
        badges: vec![Badge {
            id: "b1".to_string(),
            name: "Keep-Cup Guardian".to_string(),
            icon: "🌱".to_string(),
            is_locked: false,
        }],
        unlocked_varietals: vec!["sl28".to_string(), "caturra".to_string()],
    }
}

/// Placeholder profile for another author, until a real lookup exists
pub fn visitor_profile(author: &Author) -> User {
    User {
        id: author.id.clone(),
        name: author.name.clone(),
        avatar: author.avatar.clone(),
        bio: "Loves coffee, loves life. Sharing the memory of every cup.".to_string(),
        stats: UserStats {
            posts: 12,
            followers: 345,
            following: 28,
        },
        palate_score: 68,
        badges: Vec::new(),
        unlocked_varietals: vec!["geisha".to_string(), "bourbon".to_string()],
    }
}

fn official_author() -> Author {
    Author {
        id: "0".to_string(),
        name: "Crema Official".to_string(),
        avatar: "https://picsum.photos/seed/crema/100/100".to_string(),
        is_official: true,
    }
}

/// Generate the mock feed, newest first
///
/// Every fifth post is official, every second one carries a location and
/// distance. Flavor profiles, like counts and distances come from `seed`.
pub fn mock_posts(seed: u64, now: DateTime<Utc>) -> Vec<Post> {
    let mut rng = StdRng::seed_from_u64(seed);

    (1..=MOCK_POST_COUNT)
        .map(|i| {
            let is_official = i % 5 == 0;
            let has_location = i % 2 == 0;
            let origin = ORIGINS[i % ORIGINS.len()];
            let method = METHODS[i % METHODS.len()];

            let image = match method {
                "Pour Over" => IMAGE_POUR_OVER,
                "Flat White" | "Latte" => IMAGE_MILK,
                "Cold Brew" => IMAGE_COLD_BREW,
                _ => IMAGE_DEFAULT,
            };

            let author = if is_official {
                official_author()
            } else {
                Author {
                    id: format!("u{}", i),
                    name: format!("Taster {}", i),
                    avatar: format!("https://picsum.photos/seed/user{}/100/100", i),
                    is_official: false,
                }
            };

            let distance = has_location.then(|| format!("{:.1}km", rng.gen_range(0.5..5.0)));

            Post {
                id: format!("p{}", i),
                title: format!("{} · {} field notes #{}", origin, method, i),
                product_name: format!("{} Select Lot", origin),
                region: REGIONS[i % REGIONS.len()].to_string(),
                origin: Some(origin.to_string()),
                varietal_id: Some(VARIETAL_TAGS[i % VARIETAL_TAGS.len()].to_string()),
                location: has_location
                    .then(|| format!("Shanghai · {}", DISTRICTS[i % DISTRICTS.len()])),
                distance,
                images: vec![format!("{}?auto=format&fit=crop&q=80&w=800", image)],
                author,
                likes: rng.gen_range(50..1550),
                has_liked: false,
                roast_level: (i % 5) as u8 + 1,
                process: if i % 2 == 0 { "Washed" } else { "Natural" }.to_string(),
                method: method.to_string(),
                flavor_profile: FlavorProfile::new(
                    rng.gen_range(1..=4),
                    rng.gen_range(2..=5),
                    rng.gen_range(1..=4),
                    rng.gen_range(1..=3),
                    rng.gen_range(2..=5),
                ),
                flavors: vec!["Citrus".into(), "Chocolate".into(), "Jasmine".into()],
                topics: vec!["Single Origin".into(), "Everyday Ritual".into()],
                price_range: format!("¥{}", 30 + i % 30),
                content: "A very clear aromatic expression, opening on bright fruit acidity."
                    .to_string(),
                created_at: now - Duration::hours(i as i64),
                rating: None,
            }
        })
        .collect()
}

/// Starter discussion under a post: a text comment with an official
/// answer, a photo, and a voice note
pub fn mock_comments(post_id: &str, now: DateTime<Utc>) -> Vec<Comment> {
    let commenter = |id: &str, name: &str, avatar: &str| Author {
        id: id.to_string(),
        name: name.to_string(),
        avatar: avatar.to_string(),
        is_official: false,
    };

    let mut first = Comment::new(
        format!("{}-c1", post_id),
        commenter(
            "u7",
            "Alex.C",
            "https://images.unsplash.com/photo-1599566150163-29194dcaad36?w=100",
        ),
        CommentBody::text("The finish on this one is lovely, especially once it cools down."),
        now - Duration::minutes(15),
    );
    first.likes = 12;
    let mut answer = Comment::new(
        format!("{}-c1-r1", post_id),
        official_author(),
        CommentBody::text("Thanks! Try 90°C water next time, the sweetness comes forward."),
        now - Duration::minutes(10),
    );
    answer.likes = 4;
    first.replies.push(answer);

    let mut photo = Comment::new(
        format!("{}-c2", post_id),
        commenter(
            "u3",
            "Nana_Coffee",
            "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=100",
        ),
        CommentBody::Image {
            url: "https://images.unsplash.com/photo-1495474472287-4d71bcdd2085?w=300".to_string(),
            caption: "Got the same bag, here's my cup".to_string(),
        },
        now - Duration::hours(2),
    );
    photo.likes = 8;

    let mut voice = Comment::new(
        format!("{}-c3", post_id),
        commenter(
            "u2",
            "Barista_Ken",
            "https://images.unsplash.com/photo-1535713875002-d1d0cf377fde?w=100",
        ),
        CommentBody::Audio { duration_secs: 8 },
        now - Duration::hours(5),
    );
    voice.likes = 2;

    vec![first, photo, voice]
}

/// Inbox with a system notice, a stranger's request and a friend thread
pub fn mock_chats(now: DateTime<Utc>) -> Vec<ChatSession> {
    let msg = |id: &str, is_me: bool, text: &str, minutes_ago: i64, kind: MessageKind| ChatMessage {
        id: id.to_string(),
        is_me,
        text: text.to_string(),
        sent_at: now - Duration::minutes(minutes_ago),
        kind,
    };

    vec![
        ChatSession {
            id: "c1".to_string(),
            peer: ChatPeer {
                id: "sys".to_string(),
                name: "Crema Assistant".to_string(),
                avatar: "https://picsum.photos/seed/crema/100/100".to_string(),
                is_official: true,
            },
            last_message: "Congratulations on unlocking the Bourbon specimen!".to_string(),
            unread_count: 1,
            is_stranger: false,
            has_replied: true,
            messages: vec![
                msg("m1", false, "Welcome to the Crema community!", 1440, MessageKind::Text),
                msg(
                    "m2",
                    false,
                    "Congratulations on unlocking the Bourbon specimen!",
                    30,
                    MessageKind::Text,
                ),
            ],
        },
        ChatSession {
            id: "c2".to_string(),
            peer: ChatPeer {
                id: "u2".to_string(),
                name: "Barista_Ken".to_string(),
                avatar: "https://images.unsplash.com/photo-1535713875002-d1d0cf377fde?w=100"
                    .to_string(),
                is_official: false,
            },
            last_message: "What were your V60 parameters?".to_string(),
            unread_count: 0,
            is_stranger: true,
            has_replied: false,
            messages: vec![
                msg("m3", false, "Hello! Saw your Geisha note", 1500, MessageKind::Text),
                msg("m4", false, "What were your V60 parameters?", 1499, MessageKind::Text),
            ],
        },
        ChatSession {
            id: "c3".to_string(),
            peer: ChatPeer {
                id: "u3".to_string(),
                name: "Nana_Coffee".to_string(),
                avatar: "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=100"
                    .to_string(),
                is_official: false,
            },
            last_message: "[image]".to_string(),
            unread_count: 2,
            is_stranger: false,
            has_replied: true,
            messages: vec![
                msg("m5", true, "I love that shop too!", 4320, MessageKind::Text),
                msg("m6", false, "Right? Great atmosphere", 4305, MessageKind::Text),
                msg(
                    "m7",
                    false,
                    "https://images.unsplash.com/photo-1498804103079-a6351b050096",
                    4304,
                    MessageKind::Image,
                ),
            ],
        },
    ]
}
