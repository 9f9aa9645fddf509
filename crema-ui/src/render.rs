//! Plain-text rendering for the terminal front end

use crema_common::comments::{Comment, CommentBody, CommentThread};
use crema_common::models::{Post, User};
use crema_common::palate::PalateLevel;
use crema_common::{FlavorAxis, Language, VarietalCatalog};

/// Shown in place of cards when nothing passes the filters
pub const EMPTY_FEED: &str = "No notes match the current filters.";

/// One card: title line, byline, then the flavor summary
pub fn render_card(post: &Post, language: Language) -> String {
    let byline = if post.author.is_official {
        format!("{} [official]", post.author.name)
    } else {
        post.author.name.clone()
    };
    let place = match (&post.location, &post.distance) {
        (Some(location), Some(distance)) => format!(" · {} ({})", location, distance),
        (Some(location), None) => format!(" · {}", location),
        (None, Some(distance)) => format!(" · {}", distance),
        _ => String::new(),
    };
    let like = if post.has_liked { "♥" } else { "♡" };

    let flavor = FlavorAxis::ALL
        .iter()
        .map(|&axis| format!("{} {}", language.axis_label(axis), post.flavor_profile.get(axis)))
        .collect::<Vec<_>>()
        .join(" / ");

    format!(
        "[{}] {}\n    {}{} · {} · {} · roast {} · {} {}\n    {}",
        post.id,
        post.title,
        byline,
        place,
        post.region,
        post.method,
        post.roast_level,
        like,
        post.likes,
        flavor
    )
}

/// Feed listing, or the empty-state line
pub fn render_feed(posts: &[Post], language: Language) -> Vec<String> {
    if posts.is_empty() {
        return vec![EMPTY_FEED.to_string()];
    }
    posts.iter().map(|p| render_card(p, language)).collect()
}

/// Profile header with palate level and specimen progress
pub fn profile_header(user: &User, catalog: &VarietalCatalog) -> String {
    let (unlocked, total) = catalog.progress(user);
    let mut header = format!(
        "{} · {} ({}/100) · specimens {}/{}",
        user.name,
        PalateLevel::from_score(user.palate_score),
        user.palate_score,
        unlocked,
        total
    );
    if let Some(latest) = catalog.latest_unlocked(user) {
        header.push_str(&format!(" · latest {} {}", latest.icon, latest.name));
    }
    header
}

fn comment_line(thread: &CommentThread, comment: &Comment, indent: &str) -> String {
    let attachment = match &comment.body {
        CommentBody::Text { .. } => String::new(),
        CommentBody::Image { url, .. } => format!(" [image {}]", url),
        CommentBody::Audio { duration_secs } => format!(" [voice {}\"]", duration_secs),
    };
    let heart = if thread.is_liked(&comment.id) { "♥" } else { "♡" };
    format!(
        "{}{} ({}): {}{} {} {}",
        indent,
        comment.author.name,
        comment.id,
        comment.display_text(),
        attachment,
        heart,
        thread.like_count(comment)
    )
}

/// Discussion under a post, replies indented beneath their comment
pub fn render_comments(thread: &CommentThread) -> Vec<String> {
    if thread.is_empty() {
        return vec!["No comments yet.".to_string()];
    }
    thread
        .comments()
        .iter()
        .flat_map(|root| {
            std::iter::once(comment_line(thread, root, ""))
                .chain(root.replies.iter().map(move |r| comment_line(thread, r, "    ↳ ")))
        })
        .collect()
}

/// Specimen book: one line per catalog entry, locked ones dimmed
pub fn render_catalog(user: &User, catalog: &VarietalCatalog) -> Vec<String> {
    catalog
        .entries()
        .iter()
        .map(|v| {
            if user.has_unlocked(&v.id) {
                format!("{} {} ({}) {}", v.icon, v.name, v.latin_name, v.description)
            } else {
                format!("🔒 {} (locked)", v.name)
            }
        })
        .collect()
}
