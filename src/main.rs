use std::sync::Arc;
use std::time::Duration;

use crate::backend::BookingStore;
use crate::configuration::Configuration;
use crate::configuration_handler::ConfigurationHandler;
use crate::database_interface::DatabaseInterface;
use crate::http::create_app;
use crate::local_bookings::LocalBookings;
use crate::questions::{QuestionGenerator, TemplateQuestions};
use crate::scheduler::Scheduler;
use chrono::FixedOffset;
use tokio::time::sleep;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod backend;
mod configuration;
mod configuration_handler;
mod database_interface;
mod http;
mod local_bookings;
mod questions;
mod scheduler;
mod schema;
#[cfg(test)]
mod testutils;
mod types;

pub struct AppState<B: BookingStore, G: QuestionGenerator, C: Configuration> {
    pub scheduler: Scheduler<B>,
    pub question_generator: Arc<G>,
    pub configuration: C,
}

impl<B: BookingStore, G: QuestionGenerator, C: Configuration> Clone for AppState<B, G, C> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            question_generator: Arc::clone(&self.question_generator),
            configuration: self.configuration.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("#######################");
    println!("# Interview Scheduler #");
    println!("#######################");

    let configuration = ConfigurationHandler::parse_arguments();
    let utc_offset = FixedOffset::east_opt(configuration.utc_offset_minutes() * 60).unwrap();
    let question_generator = Arc::new(TemplateQuestions);

    let address = format!("0.0.0.0:{}", configuration.port());
    println!("Accessible at:\n{}", address.clone());
    let listener = tokio::net::TcpListener::bind(address).await.unwrap();

    let app = if let Some(database_url) = configuration.database_url() {
        let backend = loop {
            match DatabaseInterface::new(&database_url) {
                Ok(backend) => {
                    info!("Successfully connected to database");
                    break backend;
                }
                Err(err) => {
                    error!(?err, "Failed to establish database connection: {database_url}. Retry in 1 sec. You may want to restart with the database disabled (impersistent bookings).");
                    sleep(Duration::from_secs(1)).await;
                }
            }
        };
        create_app(AppState {
            scheduler: Scheduler::new(backend, utc_offset),
            question_generator,
            configuration,
        })
    } else {
        let backend = LocalBookings::default();
        create_app(AppState {
            scheduler: Scheduler::new(backend, utc_offset),
            question_generator,
            configuration,
        })
    };

    axum::serve(listener, app).await.unwrap();
}
