//! Plain-text rendering of view snapshots.

use std::fmt::Write;

use scenevault_core::entity::Entity;
use scenevault_core::models::movie::Movie;
use scenevault_core::models::scene::Scene;
use scenevault_core::models::user::User;
use scenevault_views::home::excerpt;
use scenevault_views::{HomeSnapshot, ListSnapshot, MovieDetail, SceneDetail};

pub fn movie_line(movie: &Movie) -> String {
    let mut line = format!("#{:<5} {}", movie.id, movie.display_title());
    if let Some(director) = &movie.director {
        let _ = write!(line, ", dir. {director}");
    }
    if let Some(rating) = movie.imdb_rating {
        let _ = write!(line, "  [{rating:.1}]");
    }
    line
}

/// `movie_title` resolves the parent movie for display.
pub fn scene_line(scene: &Scene, movie_title: &str) -> String {
    let mut line = format!("#{:<5} {} ({movie_title})", scene.id, scene.title);
    if !scene.tags.is_empty() {
        let _ = write!(line, "  [{}]", scene.tags);
    }
    line
}

pub fn user_line(user: &User) -> String {
    format!(
        "#{:<5} {:<20} {:<30} {}",
        user.id,
        user.username,
        user.email.as_deref().unwrap_or("-"),
        user.role_label()
    )
}

/// Items are pre-rendered by the caller; this adds the paging footer.
pub fn list_page<E: Entity>(snapshot: &ListSnapshot<E>, lines: &[String]) -> String {
    let mut out = String::new();
    if !snapshot.query.is_empty() {
        let _ = writeln!(out, "Results for \"{}\"", snapshot.query);
    }
    if lines.is_empty() {
        let _ = writeln!(out, "No {} found.", E::COLLECTION);
    }
    for line in lines {
        let _ = writeln!(out, "{line}");
    }
    if snapshot.total_pages > 1 {
        let _ = writeln!(
            out,
            "Page {} of {} ({} total)",
            snapshot.page, snapshot.total_pages, snapshot.total
        );
    }
    out
}

pub fn home(snapshot: &HomeSnapshot) -> String {
    let mut out = String::from("Latest movies\n");
    for movie in &snapshot.movies {
        let _ = writeln!(out, "  {}", movie_line(movie));
    }
    out.push_str("\nLatest scenes\n");
    for scene in &snapshot.scenes {
        let _ = writeln!(out, "  #{:<5} {}", scene.id, scene.title);
        let text = excerpt(scene.description.as_deref());
        if !text.is_empty() {
            let _ = writeln!(out, "         {text}");
        }
    }
    out
}

pub fn movie_detail(detail: &MovieDetail) -> String {
    let movie = &detail.movie;
    let mut out = format!("{}\n", movie.display_title());
    field(&mut out, "Director", movie.director.as_deref());
    field(&mut out, "Genres", movie.genres.as_deref());
    if let Some(duration) = movie.duration {
        let _ = writeln!(out, "Duration: {duration} min");
    }
    if let Some(rating) = movie.imdb_rating {
        let _ = writeln!(out, "IMDb: {rating:.1}");
    }
    field(&mut out, "Poster", movie.poster_url.as_deref());
    if let Some(description) = &movie.description {
        let _ = writeln!(out, "\n{description}");
    }

    let _ = writeln!(out, "\nScenes ({})", detail.scenes.len());
    for scene in &detail.scenes {
        let _ = writeln!(out, "  #{:<5} {} {}", scene.id, scene.title, scene.time_range());
    }
    out
}

pub fn scene_detail(detail: &SceneDetail) -> String {
    let scene = &detail.scene;
    let mut out = format!("{}\n", scene.title);
    match &detail.movie {
        Some(movie) => {
            let _ = writeln!(out, "Movie: {} (#{})", movie.display_title(), movie.id);
        }
        None => {
            let _ = writeln!(out, "Movie: #{}", scene.movie_id);
        }
    }
    let _ = writeln!(out, "Time: {}", detail.time_range);
    if !scene.tags.is_empty() {
        let _ = writeln!(out, "Tags: {}", scene.tags);
    }
    field(&mut out, "Video", scene.video_url.as_deref());
    field(&mut out, "Player", detail.embed_url.as_deref());
    field(&mut out, "Image", scene.image_url.as_deref());
    if let Some(description) = &scene.description {
        let _ = writeln!(out, "\n{description}");
    }
    out
}

pub fn profile(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Username: {}", user.username);
    let _ = writeln!(out, "E-mail:   {}", user.email.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "Role:     {}", user.role_label());
    out
}

fn field(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = writeln!(out, "{label}: {value}");
    }
}
