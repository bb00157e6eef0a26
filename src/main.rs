use guestbookd::config::{self, ServerConfig};
use guestbookd::net::server::Server;

fn main() -> std::io::Result<()> {
    let cfg = ServerConfig::from_file("guestbookd.toml");
    config::set_config(cfg);

    let mut server = Server::new();
    async_std::task::block_on(server.run())
}
