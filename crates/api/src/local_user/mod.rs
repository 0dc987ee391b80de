pub mod change_password;
pub mod login;
pub mod logout;
pub mod my_user;
