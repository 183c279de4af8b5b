use anyhow::{Context, Result, bail};
use reelfeed::{AppConfig, Movie, MoviesApi, MoviesService};
use tracing::info;

const USAGE: &str = "usage: reelfeed <trending|now-playing|upcoming|recent> [page]
       reelfeed search <title> [page]
       reelfeed movie <id>
       reelfeed similar <id> [page]";

fn parse_page(arg: Option<&String>) -> Result<u32> {
    match arg {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid page number: {raw}")),
        None => Ok(1),
    }
}

fn print_movies(movies: &[Movie]) {
    for movie in movies {
        let rating = movie
            .rating()
            .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
        println!(
            "{:<12} {:<6} {:>4}  {}",
            movie.id(),
            movie.year().unwrap_or("-"),
            rating,
            movie.title()
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    reelfeed::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!("{USAGE}");
    };

    let config = AppConfig::load().context("failed to load configuration")?;
    let api = MoviesApi::from_config(&config.api)?;

    match command.as_str() {
        "movie" => {
            let id = args.get(1).context(USAGE)?;
            let detail = api.get_movie(id).await?;
            println!("{} ({})", detail.title, detail.year.as_deref().unwrap_or("?"));
            if let Some(overview) = &detail.overview {
                println!("{overview}");
            }
            if !detail.genres.is_empty() {
                println!("Genres: {}", detail.genres.join(", "));
            }
            if let Some(trailer) = detail.trailer_url() {
                println!("Trailer: {trailer}");
            }
            return Ok(());
        }
        "search" => {
            let title = args.get(1).context(USAGE)?;
            let page = parse_page(args.get(2))?;
            print_movies(&api.get_movies_by_title(title, page).await?);
        }
        "similar" => {
            let id = args.get(1).context(USAGE)?;
            let page = parse_page(args.get(2))?;
            print_movies(&api.get_similar(id, page).await?);
        }
        feed => {
            let page = parse_page(args.get(1))?;
            let movies = match feed {
                "trending" => api.get_trending(page).await?,
                "now-playing" => api.get_now_playing(page).await?,
                "upcoming" => api.get_upcoming(page).await?,
                "recent" => api.get_recently_added(page).await?,
                _ => bail!("{USAGE}"),
            };
            info!("{feed} page {page}: {} movies", movies.len());
            print_movies(&movies);
        }
    }

    Ok(())
}
