use actix_web::web;

pub mod auth_handler;
pub mod blog_handler;
pub mod catalog_handler;
pub mod challenge_handler;
pub mod contact_handler;
pub mod dashboard_handler;
pub mod partner_handler;
pub mod quiz_handler;
pub mod user_handler;

/// Routes reachable without a bearer token.
pub fn public_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(user_handler::health_check)
        .service(user_handler::health_check_ready)
        .service(user_handler::health_check_live)
        .service(auth_handler::register)
        .service(auth_handler::login)
        .service(auth_handler::refresh)
        .service(auth_handler::logout)
        .service(catalog_handler::list_books)
        .service(catalog_handler::get_book)
        .service(catalog_handler::list_genres)
        .service(quiz_handler::list_quizzes)
        .service(blog_handler::list_posts)
        .service(blog_handler::get_post)
        .service(contact_handler::submit_contact)
        .service(partner_handler::list_partners)
        .service(partner_handler::get_partner)
        // "active" must register before the id catch-all
        .service(challenge_handler::list_active_challenges)
        .service(challenge_handler::get_challenge);
}

/// Routes mounted under /api behind the auth middleware.
pub fn protected_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(user_handler::get_all_users)
        .service(user_handler::get_user)
        .service(user_handler::update_user)
        .service(user_handler::update_tier)
        .service(user_handler::delete_user)
        .service(user_handler::leaderboard)
        .service(dashboard_handler::get_dashboard)
        .service(catalog_handler::create_book)
        .service(catalog_handler::update_book)
        .service(catalog_handler::delete_book)
        .service(catalog_handler::create_genre)
        .service(catalog_handler::delete_genre)
        .service(quiz_handler::get_quiz_for_taking)
        .service(quiz_handler::create_quiz)
        .service(quiz_handler::update_quiz)
        .service(quiz_handler::publish_quiz)
        .service(quiz_handler::unpublish_quiz)
        .service(quiz_handler::delete_quiz)
        .service(quiz_handler::submit_attempt)
        .service(quiz_handler::list_my_attempts)
        .service(quiz_handler::get_attempt)
        .service(blog_handler::create_post)
        .service(blog_handler::update_post)
        .service(blog_handler::delete_post)
        .service(blog_handler::add_comment)
        .service(blog_handler::rate_post)
        .service(contact_handler::list_contact_messages)
        .service(contact_handler::mark_contact_read)
        .service(partner_handler::create_partner)
        .service(partner_handler::update_partner)
        .service(partner_handler::delete_partner)
        .service(challenge_handler::list_all_challenges)
        .service(challenge_handler::create_challenge)
        .service(challenge_handler::update_challenge)
        .service(challenge_handler::delete_challenge);
}
