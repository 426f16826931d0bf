use actix_web::web;

use super::comments::comment_handlers;
use super::tasks::task_handlers;
use super::users::user_handlers;

pub fn task_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/task")
            .route("", web::get().to(task_handlers::get_tasks))
            .route("", web::post().to(task_handlers::create_task))
            .route("/stats", web::get().to(task_handlers::get_task_stats))
            .route("/search", web::get().to(task_handlers::search_tasks))
            .route("/export", web::get().to(task_handlers::export_tasks_csv))
            .route(
                "/assign/{task_id}/{user_id}",
                web::post().to(task_handlers::assign_task),
            )
            .route("/{id}", web::get().to(task_handlers::get_task))
            .route("/{id}", web::put().to(task_handlers::update_task))
            .route("/{id}", web::delete().to(task_handlers::delete_task)),
    );
}

pub fn user_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .route("", web::get().to(user_handlers::get_users))
            .route("", web::post().to(user_handlers::create_user))
            .route("/{id}", web::get().to(user_handlers::get_user))
            .route("/{id}", web::put().to(user_handlers::update_user))
            .route("/{id}", web::delete().to(user_handlers::delete_user)),
    );
}

pub fn comment_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/comments")
            .route("", web::post().to(comment_handlers::post_comment))
            .route(
                "/task/{task_id}",
                web::get().to(comment_handlers::get_comments_by_task),
            )
            .route("/{id}", web::get().to(comment_handlers::get_comment))
            .route("/{id}", web::delete().to(comment_handlers::delete_comment)),
    );
}
