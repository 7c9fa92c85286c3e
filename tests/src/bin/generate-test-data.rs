use mantic_api::{
    now_millis, Bet, BetId, Comment, CommentId, CommentParent, Content, Contract, ContractId,
    OutcomeType, User, UserId, Uuid,
};
use rand::Rng;

const NUM_USERS: usize = 3;

const NUM_CONTRACTS: usize = 10;
const NUM_BETS_PER_CONTRACT: usize = 20;
const NUM_COMMENTS_PER_CONTRACT: usize = 5;

const QUESTION_WORD_COUNT: usize = 8;
const COMMENT_WORD_COUNT: usize = 12;

fn gen_n_items(table: &str, n: usize, mut f: impl FnMut(usize) -> String) {
    println!("INSERT INTO {} VALUES", table);
    for i in 0..n {
        if i != 0 {
            println!(",");
        }
        print!("    {}", f(i));
    }
    println!();
    println!("ON CONFLICT DO NOTHING;");
}

fn sql_str(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn json_doc<T: serde::Serialize>(record: &T) -> String {
    sql_str(&serde_json::to_string(record).expect("serializing record"))
}

fn main() {
    let mut rng = rand::thread_rng();

    let users: Vec<User> = (0..NUM_USERS)
        .map(|i| User {
            id: UserId(Uuid::new_v4()),
            name: format!("Test User {}", i),
            username: format!("testuser{}", i),
            avatar_url: None,
        })
        .collect();

    // Generate contracts
    let mut contracts = Vec::new();
    gen_n_items("contracts", NUM_CONTRACTS, |i| {
        let creator = &users[rng.gen_range(0..NUM_USERS)];
        let contract = Contract {
            id: ContractId(Uuid::new_v4()),
            slug: format!("test-market-{}", i),
            creator_id: creator.id,
            creator_name: creator.name.clone(),
            creator_username: creator.username.clone(),
            question: format!("{}?", lipsum::lipsum_words(QUESTION_WORD_COUNT)),
            description: Content::text(lipsum::lipsum_words(COMMENT_WORD_COUNT)),
            outcome_type: OutcomeType::Binary,
            created_time: now_millis(),
            close_time: None,
            is_resolved: false,
            resolution: None,
            resolution_time: None,
            probability: Some(rng.gen_range(0.05..0.95)),
            volume: 0.0,
        };
        let row = format!(
            "({}, {}, {})",
            sql_str(&contract.id.0.to_string()),
            sql_str(&contract.slug),
            json_doc(&contract),
        );
        contracts.push(contract);
        row
    });

    // Generate bets
    gen_n_items("bets", NUM_CONTRACTS * NUM_BETS_PER_CONTRACT, |i| {
        let contract = &contracts[i / NUM_BETS_PER_CONTRACT];
        let prob_before = rng.gen_range(0.05..0.95);
        let bet = Bet {
            id: BetId(Uuid::new_v4()),
            user_id: users[rng.gen_range(0..NUM_USERS)].id,
            contract_id: contract.id,
            created_time: now_millis(),
            amount: rng.gen_range(1.0..250.0),
            outcome: String::from(if rng.gen() { "YES" } else { "NO" }),
            shares: rng.gen_range(1.0..500.0),
            prob_before,
            prob_after: (prob_before + rng.gen_range(-0.05..0.05)).clamp(0.01, 0.99),
        };
        format!(
            "({}, {}, {}, {})",
            sql_str(&bet.id.0.to_string()),
            sql_str(&bet.contract_id.0.to_string()),
            bet.created_time,
            json_doc(&bet),
        )
    });

    // Generate comments
    gen_n_items(
        "comments",
        NUM_CONTRACTS * NUM_COMMENTS_PER_CONTRACT,
        |i| {
            let contract = &contracts[i / NUM_COMMENTS_PER_CONTRACT];
            let author = &users[rng.gen_range(0..NUM_USERS)];
            let comment = Comment {
                id: CommentId(Uuid::new_v4()),
                user_id: author.id,
                user_name: author.name.clone(),
                user_username: author.username.clone(),
                user_avatar_url: author.avatar_url.clone(),
                content: Content::text(lipsum::lipsum_words(COMMENT_WORD_COUNT)),
                created_time: now_millis(),
                reply_to_comment_id: None,
                parent: CommentParent::Contract {
                    contract_id: contract.id,
                    answer_outcome: None,
                },
            };
            format!(
                "({}, {}, {}, {}, {}, {})",
                sql_str(comment.kind().as_str()),
                sql_str(&comment.parent_id().to_string()),
                sql_str(&comment.id.0.to_string()),
                sql_str(&comment.user_id.0.to_string()),
                comment.created_time,
                json_doc(&comment),
            )
        },
    );
}
