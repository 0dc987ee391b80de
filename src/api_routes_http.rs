use actix_web::web;
use connecthub_api::{
  local_user::{
    change_password::change_password,
    login::login,
    logout::logout,
    my_user::get_my_user,
  },
  post::{categories::replace_post_categories, like::like_post, search::search_posts},
  site::{
    dashboard::get_dashboard,
    deactivate_user::deactivate_user,
    delete_post::admin_delete_post,
    list_posts::admin_list_posts,
    list_users::list_users,
    update_post::admin_update_post,
    update_user::update_user,
  },
};
use connecthub_api_crud::{
  category::{
    create::create_category,
    delete::deactivate_category,
    list::list_categories,
    list_posts::list_category_posts,
    read::get_category,
    update::update_category,
  },
  comment::{
    create::create_comment,
    delete::delete_comment,
    list::list_comments,
    update::update_comment,
  },
  post::{
    create::create_post,
    delete::delete_post,
    list::list_posts,
    read::get_post,
    update::update_post,
  },
  user::{
    create::register,
    list_posts::list_person_posts,
    read::get_person,
    update::save_profile,
  },
};

pub fn config(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api")
      // Auth
      .service(
        web::scope("/auth")
          .route("/register", web::post().to(register))
          .route("/login", web::post().to(login))
          .route("/logout", web::post().to(logout))
          .route("/me", web::get().to(get_my_user))
          .route("/change-password", web::post().to(change_password)),
      )
      // Post
      .service(
        web::scope("/posts")
          .route("", web::get().to(list_posts))
          .route("", web::post().to(create_post))
          .route("/search", web::get().to(search_posts))
          .route("/{id}", web::get().to(get_post))
          .route("/{id}", web::put().to(update_post))
          .route("/{id}", web::delete().to(delete_post))
          .route("/{id}/categories", web::post().to(replace_post_categories))
          .route("/{id}/like", web::post().to(like_post))
          // Comment
          .route("/{id}/comments", web::get().to(list_comments))
          .route("/{id}/comments", web::post().to(create_comment))
          .route("/{id}/comments/{comment_id}", web::put().to(update_comment))
          .route(
            "/{id}/comments/{comment_id}",
            web::delete().to(delete_comment),
          ),
      )
      // Category
      .service(
        web::scope("/categories")
          .route("", web::get().to(list_categories))
          .route("", web::post().to(create_category))
          .route("/{id}", web::get().to(get_category))
          .route("/{id}", web::put().to(update_category))
          .route("/{id}", web::delete().to(deactivate_category))
          .route("/{id}/posts", web::get().to(list_category_posts)),
      )
      // User
      .service(
        web::scope("/users")
          .route("/me", web::get().to(get_my_user))
          .route("/me", web::put().to(save_profile))
          .route("/{id}", web::get().to(get_person))
          .route("/{id}/posts", web::get().to(list_person_posts)),
      )
      // Admin Actions
      .service(
        web::scope("/admin")
          .route("/dashboard", web::get().to(get_dashboard))
          .route("/users", web::get().to(list_users))
          .route("/users/{id}", web::put().to(update_user))
          .route("/users/{id}", web::delete().to(deactivate_user))
          .route("/categories", web::post().to(create_category))
          .route("/categories/{id}", web::put().to(update_category))
          .route("/categories/{id}", web::delete().to(deactivate_category))
          .route("/posts", web::get().to(admin_list_posts))
          .route("/posts/{id}", web::put().to(admin_update_post))
          .route("/posts/{id}", web::delete().to(admin_delete_post)),
      ),
  );
}
