use actix_web::{web, App, HttpResponse, HttpServer};
use dotenv::dotenv;
use std::env;

use task_manager_backend::{db, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = db::connect(&database_url)
        .await
        .expect("Failed to create pool");
    db::init_schema(&pool)
        .await
        .expect("Failed to initialize schema");

    let server_address = "0.0.0.0:8080";
    println!("Server running at http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .route(
                "/",
                web::get().to(|| async { HttpResponse::Ok().body("Hello, world!") }),
            )
            .configure(routes::routes::task_configure)
            .configure(routes::routes::user_configure)
            .configure(routes::routes::comment_configure)
    })
    .bind(server_address)?
    .run()
    .await
}
