use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::routes::{default_route, score_route};

pub fn run(listener: TcpListener) -> Result<Server, std::io::Error> {
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::default)
            .service(
                web::scope("/score")
                    .service(score_route::score_batch)
                    .service(score_route::competition)
                    .service(score_route::industry),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
