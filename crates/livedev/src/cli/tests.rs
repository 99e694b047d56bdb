#[cfg(test)]
mod tests {
    use crate::cli::validation::parse_addr;
    use crate::cli::{Cli, Strategy};
    use clap::Parser;
    use std::net::SocketAddr;
    use std::path::PathBuf;

    #[test]
    fn test_parse_addr_full() {
        assert_eq!(
            parse_addr("127.0.0.1:3000"),
            Ok("127.0.0.1:3000".parse::<SocketAddr>().unwrap())
        );
        assert_eq!(
            parse_addr("[::1]:3000"),
            Ok("[::1]:3000".parse::<SocketAddr>().unwrap())
        );
    }

    #[test]
    fn test_parse_addr_port_only_forms() {
        // Leading colon listens everywhere
        assert_eq!(
            parse_addr(":8080"),
            Ok("0.0.0.0:8080".parse::<SocketAddr>().unwrap())
        );

        // Bare port stays on loopback
        assert_eq!(
            parse_addr("8080"),
            Ok("127.0.0.1:8080".parse::<SocketAddr>().unwrap())
        );
    }

    #[test]
    fn test_parse_addr_localhost() {
        assert_eq!(
            parse_addr("localhost:4000"),
            Ok("127.0.0.1:4000".parse::<SocketAddr>().unwrap())
        );
    }

    #[test]
    fn test_parse_addr_invalid() {
        assert!(parse_addr("").is_err());
        assert!(parse_addr("localhost").is_err());
        assert!(parse_addr(":http").is_err());
        assert!(parse_addr("127.0.0.1:99999").is_err());
    }

    #[test]
    fn test_strategy_enum_values() {
        use clap::ValueEnum;

        let names: Vec<_> = Strategy::value_variants()
            .iter()
            .map(|v| v.to_possible_value().unwrap().get_name().to_string())
            .collect();
        assert_eq!(names, vec!["events", "poll"]);
    }

    #[test]
    fn test_cli_defaults_leave_options_unset() {
        let cli = Cli::try_parse_from(["livedev"]).unwrap();

        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.serve.addr.is_none());
        assert!(cli.serve.root.is_none());
        assert!(cli.serve.strategy.is_none());
        assert!(!cli.serve.open);
    }

    #[test]
    fn test_cli_parses_serve_options() {
        let cli = Cli::try_parse_from([
            "livedev",
            "-a",
            ":9000",
            "-d",
            "public",
            "--strategy",
            "poll",
            "--debounce-ms",
            "50",
            "--poll-interval-ms",
            "250",
            "--keep-alive-secs",
            "10",
            "--open",
        ])
        .unwrap();

        assert_eq!(
            cli.serve.addr,
            Some("0.0.0.0:9000".parse::<SocketAddr>().unwrap())
        );
        assert_eq!(cli.serve.root, Some(PathBuf::from("public")));
        assert_eq!(cli.serve.strategy, Some(Strategy::Poll));
        assert_eq!(cli.serve.debounce_ms, Some(50));
        assert_eq!(cli.serve.poll_interval_ms, Some(250));
        assert_eq!(cli.serve.keep_alive_secs, Some(10));
        assert!(cli.serve.open);
    }

    #[test]
    fn test_cli_polling_alias() {
        let cli = Cli::try_parse_from(["livedev", "--strategy", "polling"]).unwrap();
        assert_eq!(cli.serve.strategy, Some(Strategy::Poll));
    }

    #[test]
    fn test_cli_rejects_bad_addr() {
        assert!(Cli::try_parse_from(["livedev", "--addr", "nope"]).is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["livedev", "-v", "-q"]).is_err());
    }
}
