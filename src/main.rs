#[macro_use]
extern crate rocket;

#[launch]
fn rocket() -> _ {
    // Pick up ROCKET_* overrides from a .env file
    dotenv::dotenv().ok();

    simon_says::rocket(rocket::Config::figment())
}
