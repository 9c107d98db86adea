/// Detail modal overlay
///
/// Renders the currently selected record over a dimmed backdrop.
/// Clicking the backdrop or the close control dismisses it; dismissal
/// is purely local and never cancels an in-flight request.

use iced::widget::{button, center, column, container, mouse_area, opaque, row, stack, text};
use iced::{Color, Element, Length};

use crate::api::poster::PosterCache;
use crate::state::data::MovieDetail;
use crate::ui::grid;
use crate::Message;

/// Width of the modal card
const MODAL_WIDTH: f32 = 640.0;

/// Stack the detail card over the base view with a dimmed backdrop
pub fn modal<'a>(
    base: Element<'a, Message>,
    movie: &'a MovieDetail,
    posters: &PosterCache,
) -> Element<'a, Message> {
    stack![
        base,
        opaque(
            mouse_area(
                center(opaque(detail_card(movie, posters))).style(|_theme| container::Style {
                    background: Some(
                        Color {
                            a: 0.7,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                })
            )
            .on_press(Message::CloseDetails)
        )
    ]
    .into()
}

/// The modal body: poster, plot, genre, director, rating
fn detail_card<'a>(movie: &'a MovieDetail, posters: &PosterCache) -> Element<'a, Message> {
    let header = row![
        text(&movie.title).size(26).width(Length::Fill),
        button(text("✕").size(18))
            .style(button::text)
            .on_press(Message::CloseDetails),
    ];

    let rating = row![
        text("★").size(16).style(|_theme| text::Style {
            color: Some(Color::from_rgb(0.98, 0.80, 0.08)),
        }),
        text(&movie.imdb_rating).size(16),
    ]
    .spacing(6);

    let info = column![
        text(&movie.plot).size(15),
        row![
            fact("Genre", &movie.genre),
            fact("Director", &movie.director)
        ]
        .spacing(24),
        rating,
    ]
    .spacing(14)
    .width(Length::Fill);

    let body = row![
        container(grid::poster_image(
            posters,
            &movie.imdb_id,
            grid::DETAIL_POSTER_HEIGHT
        ))
        .width(200.0),
        info,
    ]
    .spacing(20);

    container(column![header, text(&movie.year).size(14), body].spacing(12))
        .width(MODAL_WIDTH)
        .padding(24)
        .style(container::rounded_box)
        .into()
}

/// A small labeled value pair
fn fact<'a>(label: &'a str, value: &'a str) -> Element<'a, Message> {
    column![text(label).size(12), text(value).size(15)]
        .spacing(2)
        .into()
}
