// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tests for SSH configuration parser

use super::core::*;
use super::helpers::*;
use crate::ssh_config::error::ConfigError;
use crate::ssh_config::types::{DirectiveValue, HostBlock, HostPattern};

fn parse_str(content: &str) -> Vec<HostBlock> {
    parse(content.lines()).unwrap()
}

fn scalar<'a>(block: &'a HostBlock, directive: &str) -> Option<&'a str> {
    block.get(directive).and_then(DirectiveValue::as_scalar)
}

fn host_patterns(block: &HostBlock) -> Vec<String> {
    block.patterns.iter().map(|p| p.to_string()).collect()
}

#[test]
fn test_parse_yes_no_values() {
    assert!(parse_yes_no("key", "yes").unwrap());
    assert!(parse_yes_no("key", "true").unwrap());
    assert!(parse_yes_no("key", "1").unwrap());
    assert!(!parse_yes_no("key", "no").unwrap());
    assert!(!parse_yes_no("key", "false").unwrap());
    assert!(!parse_yes_no("key", "0").unwrap());
    assert!(parse_yes_no("key", "invalid").is_err());
}

#[test]
fn test_parse_single_host() {
    let content = r#"
Host example.com
    User testuser
    Port 2222
"#;
    let blocks = parse_str(content);
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].is_implicit());
    assert!(blocks[0].is_empty());
    assert_eq!(host_patterns(&blocks[1]), vec!["example.com"]);
    assert_eq!(scalar(&blocks[1], "user"), Some("testuser"));
    assert_eq!(scalar(&blocks[1], "port"), Some("2222"));
}

#[test]
fn test_parse_classic_layout() {
    let content = "\
# A timeless classic?

Host *
    User robey
    IdentityFile    =~/.ssh/id_rsa

# Comments
Host *.example.com
    \tUser bjork
Port=3333
Host *
Crazy something dumb
Host spoo.example.com
Crazy something else
";
    let blocks = parse_str(content);
    let hosts: Vec<Vec<String>> = blocks.iter().map(host_patterns).collect();
    assert_eq!(
        hosts,
        vec![
            vec!["*"],
            vec!["*"],
            vec!["*.example.com"],
            vec!["*"],
            vec!["spoo.example.com"],
        ]
    );

    assert!(blocks[0].is_empty());
    assert_eq!(
        blocks[1].get("identityfile"),
        Some(&DirectiveValue::List(vec!["~/.ssh/id_rsa".to_string()]))
    );
    assert_eq!(scalar(&blocks[1], "user"), Some("robey"));
    assert_eq!(scalar(&blocks[2], "user"), Some("bjork"));
    assert_eq!(scalar(&blocks[2], "port"), Some("3333"));
    assert_eq!(scalar(&blocks[3], "crazy"), Some("something dumb"));
    assert_eq!(scalar(&blocks[4], "crazy"), Some("something else"));
}

#[test]
fn test_global_directives_land_in_implicit_block() {
    let blocks = parse_str("User foo\nIdentityFile id_dsa0\n\nHost *\nIdentityFile id_dsa1\n");
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].is_implicit());
    assert_eq!(blocks[0].patterns, vec![HostPattern::new("*", false)]);
    assert_eq!(scalar(&blocks[0], "user"), Some("foo"));
    assert_eq!(
        blocks[0].get("identityfile"),
        Some(&DirectiveValue::List(vec!["id_dsa0".to_string()]))
    );
    assert!(!blocks[1].is_implicit());
}

#[test]
fn test_parse_equals_syntax() {
    let content = r#"
Host space-delimited
    ProxyCommand foo bar=biz baz
Host equals-delimited
    ProxyCommand=foo bar=biz baz
Host equals-with-space
    ProxyCommand = foo=bar
Host equals-no-space
    ProxyCommand=foo=bar
"#;
    let blocks = parse_str(content);
    assert_eq!(scalar(&blocks[1], "proxycommand"), Some("foo bar=biz baz"));
    assert_eq!(scalar(&blocks[2], "proxycommand"), Some("foo bar=biz baz"));
    assert_eq!(scalar(&blocks[3], "proxycommand"), Some("foo=bar"));
    assert_eq!(scalar(&blocks[4], "proxycommand"), Some("foo=bar"));
}

#[test]
fn test_keyword_lowercased_value_case_preserved() {
    let blocks = parse_str("Host Example\n    USER MixedCase\n    ProxyCommand SSH -W %h:%p Gateway\n");
    assert_eq!(host_patterns(&blocks[1]), vec!["Example"]);
    assert_eq!(scalar(&blocks[1], "user"), Some("MixedCase"));
    assert_eq!(
        blocks[1].directives.get("proxycommand"),
        Some(&DirectiveValue::from("SSH -W %h:%p Gateway"))
    );
    assert_eq!(blocks[1].get("PROXYCOMMAND"), blocks[1].get("proxycommand"));
}

#[test]
fn test_crlf_line_endings() {
    let content = "\nHost abcqwerty\r\nHostName 127.0.0.1\r\n";
    let blocks = parse(content.split('\n')).unwrap();
    assert_eq!(host_patterns(&blocks[1]), vec!["abcqwerty"]);
    assert_eq!(scalar(&blocks[1], "hostname"), Some("127.0.0.1"));
}

#[test]
fn test_comments() {
    let content = r#"
# This is a comment
Host example.com # trailing comment
    # Another comment
    User testuser   # who we log in as

    ProxyCommand nc host#1 %p
    IdentityFile "key # not a comment"

# Final comment
"#;
    let blocks = parse_str(content);
    assert_eq!(blocks.len(), 2);
    assert_eq!(host_patterns(&blocks[1]), vec!["example.com"]);
    assert_eq!(scalar(&blocks[1], "user"), Some("testuser"));
    assert_eq!(scalar(&blocks[1], "proxycommand"), Some("nc host#1 %p"));
    assert_eq!(
        blocks[1].get("identityfile"),
        Some(&DirectiveValue::List(vec!["key # not a comment".to_string()]))
    );
}

#[test]
fn test_quoted_values_are_unwrapped() {
    let content = r#"
Host param3 parara
    IdentityFile id_rsa
    IdentityFile "test rsa key"
    ProxyCommand sh -c "nc %h %p"
"#;
    let blocks = parse_str(content);
    assert_eq!(
        blocks[1].get("identityfile"),
        Some(&DirectiveValue::List(vec![
            "id_rsa".to_string(),
            "test rsa key".to_string()
        ]))
    );
    assert_eq!(scalar(&blocks[1], "proxycommand"), Some("sh -c \"nc %h %p\""));
}

#[test]
fn test_first_value_in_block_wins() {
    let blocks = parse_str("Host a\n    Port 22\n    Port 2222\n");
    assert_eq!(scalar(&blocks[1], "port"), Some("22"));
}

#[test]
fn test_missing_value_is_fatal() {
    for (content, line) in [
        ("Host example.com\n    User\n", 2),
        ("Host example.com\n    User=\n", 2),
        ("Host example.com\n    User =   \n", 2),
        ("Host\n", 1),
    ] {
        match parse(content.lines()) {
            Err(ConfigError::MalformedDirective { line: got, .. }) => {
                assert_eq!(got, line, "content {content:?}")
            }
            other => panic!("expected MalformedDirective for {content:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_missing_keyword_is_fatal() {
    assert!(matches!(
        parse(["=value"]),
        Err(ConfigError::MalformedDirective { line: 1, .. })
    ));
}

#[test]
fn test_unterminated_quoted_value_is_fatal() {
    let result = parse(["Host a", "    IdentityFile \"test rsa key"]);
    assert!(matches!(
        result,
        Err(ConfigError::MalformedDirective { line: 2, .. })
    ));
}

#[test]
fn test_malformed_host_line_is_fatal() {
    let result = parse(["Host param \"pam", "    Port 22"]);
    assert!(matches!(
        result,
        Err(ConfigError::MalformedHostPattern { .. })
    ));
}

#[test]
fn test_empty_explicit_blocks_are_dropped() {
    let blocks = parse_str("Host unused\nHost used\n    Port 22\nHost trailing\n");
    let hosts: Vec<Vec<String>> = blocks.iter().map(host_patterns).collect();
    assert_eq!(hosts, vec![vec!["*"], vec!["used"]]);
}

#[test]
fn test_empty_input_yields_implicit_block_only() {
    let blocks = parse(Vec::<String>::new()).unwrap();
    assert_eq!(blocks.len(), 1);
    assert!(blocks[0].is_implicit());
    assert!(blocks[0].is_empty());
}

#[test]
fn test_match_sections_are_ignored() {
    let content = r#"
Host before
    User alice
Match host *.example.com
    User matched
    Port 2222
Host after
    User bob
"#;
    let blocks = parse_str(content);
    assert_eq!(blocks.len(), 3);
    assert_eq!(scalar(&blocks[1], "user"), Some("alice"));
    assert_eq!(scalar(&blocks[1], "port"), None);
    assert_eq!(scalar(&blocks[2], "user"), Some("bob"));
}

#[test]
fn test_include_is_skipped() {
    let blocks = parse_str("Include ~/.ssh/config.d/*\nHost a\n    Port 1\n");
    assert!(blocks[0].is_empty());
    assert_eq!(blocks[1].get("include"), None);
}

#[test]
fn test_line_length_limit() {
    let long_line = format!("ProxyCommand {}", "x".repeat(9000));
    assert!(matches!(
        parse([long_line]),
        Err(ConfigError::MalformedDirective { line: 1, .. })
    ));
}

#[test]
fn test_split_directive_forms() {
    assert_eq!(split_directive("Port 22", 1).unwrap(), ("port".to_string(), "22"));
    assert_eq!(split_directive("Port=22", 1).unwrap(), ("port".to_string(), "22"));
    assert_eq!(split_directive("Port = 22", 1).unwrap(), ("port".to_string(), "22"));
    assert_eq!(split_directive("Port\t22", 1).unwrap(), ("port".to_string(), "22"));
    assert_eq!(
        split_directive("ProxyCommand==x", 1).unwrap(),
        ("proxycommand".to_string(), "=x")
    );
}

#[test]
fn test_strip_comment() {
    assert_eq!(strip_comment("# whole line"), "");
    assert_eq!(strip_comment("User foo # note"), "User foo ");
    assert_eq!(strip_comment("User foo#bar"), "User foo#bar");
    assert_eq!(strip_comment("Port 22#x"), "Port 22#x");
    assert_eq!(strip_comment("User \"a #b\" # c"), "User \"a #b\" ");
}
