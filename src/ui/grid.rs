/// Movie card grids
///
/// Both the result list and the favorites list render as a wrapping
/// grid of fixed-width cards. A card shows the cached poster (or a
/// placeholder while it loads), the title and year, a favorite toggle,
/// and, for search results, the "View Details" action.

use iced::widget::{button, column, container, image, row, text};
use iced::{Alignment, Color, ContentFit, Element, Length};
use iced_aw::Wrap;

use crate::api::poster::{PosterCache, PosterState};
use crate::state::data::MovieSummary;
use crate::state::favorites::Favorites;
use crate::Message;

/// Width of one card in the wrapping grid
const CARD_WIDTH: f32 = 210.0;

/// Height reserved for the poster area of a card
const CARD_POSTER_HEIGHT: f32 = 280.0;

/// Poster height inside the detail modal
pub const DETAIL_POSTER_HEIGHT: f32 = 300.0;

/// A wrapping grid of movie cards
pub fn movie_grid<'a>(
    movies: impl Iterator<Item = &'a MovieSummary>,
    favorites: &Favorites,
    posters: &PosterCache,
    with_details: bool,
) -> Element<'a, Message> {
    let cards: Vec<Element<'a, Message>> = movies
        .map(|movie| {
            movie_card(
                movie,
                favorites.contains(&movie.imdb_id),
                posters,
                with_details,
            )
        })
        .collect();

    Wrap::with_elements(cards)
        .spacing(16.0)
        .line_spacing(16.0)
        .into()
}

/// One card: poster, title, year, favorite toggle, optional details action
fn movie_card<'a>(
    movie: &'a MovieSummary,
    is_favorite: bool,
    posters: &PosterCache,
    with_details: bool,
) -> Element<'a, Message> {
    let heart: Element<'a, Message> = if is_favorite {
        text("♥")
            .size(20)
            .style(|_theme| text::Style {
                color: Some(Color::from_rgb(0.94, 0.27, 0.27)),
            })
            .into()
    } else {
        text("♡").size(20).into()
    };

    let caption = row![
        column![text(&movie.title).size(16), text(&movie.year).size(13)]
            .spacing(2)
            .width(Length::Fill),
        button(heart)
            .style(button::text)
            .on_press(Message::ToggleFavorite(movie.clone())),
    ]
    .align_y(Alignment::Center);

    let mut card = column![
        poster_image(posters, &movie.imdb_id, CARD_POSTER_HEIGHT),
        caption,
    ]
    .spacing(8);

    if with_details {
        card = card.push(
            button(text("View Details").size(14))
                .width(Length::Fill)
                .on_press(Message::ShowDetails(movie.imdb_id.clone())),
        );
    }

    container(card)
        .width(CARD_WIDTH)
        .padding(10)
        .style(container::rounded_box)
        .into()
}

/// The cached poster for an identifier, or a placeholder
pub fn poster_image<'a>(
    posters: &PosterCache,
    imdb_id: &str,
    height: f32,
) -> Element<'a, Message> {
    match posters.state(imdb_id) {
        Some(PosterState::Ready(path)) => image(image::Handle::from_path(path.clone()))
            .width(Length::Fill)
            .height(height)
            .content_fit(ContentFit::Cover)
            .into(),
        Some(PosterState::Loading) => poster_placeholder("Loading...", height),
        _ => poster_placeholder("No Poster", height),
    }
}

/// Centered label filling the poster area
fn poster_placeholder<'a>(label: &'a str, height: f32) -> Element<'a, Message> {
    container(text(label).size(13))
        .center_x(Length::Fill)
        .center_y(height)
        .style(container::rounded_box)
        .into()
}
