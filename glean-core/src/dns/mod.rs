mod resolver;

pub use resolver::{DnsHostResolver, HostResolver, DEFAULT_TIMEOUT};
