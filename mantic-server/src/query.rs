use mantic_api::{CommentQuery, Uuid};

pub enum Bind {
    Uuid(Uuid),
    String(String),
    I64(i64),
}

#[derive(Default)]
pub struct Sql {
    pub where_clause: String,
    pub binds: Vec<Bind>,
}

impl Sql {
    /// Adds a Bind, returning the index that should be used to refer to it assuming the first bind is at index first_bind_idx
    fn add_bind(&mut self, first_bind_idx: usize, b: Bind) -> usize {
        let res = first_bind_idx + self.binds.len();
        self.binds.push(b);
        res
    }
}

/// Assumes the comments table columns comment_type, parent_id, user_id and
/// created_time are available. Ordering and LIMIT are appended by the caller.
pub fn to_postgres(q: &CommentQuery, first_bind_idx: usize) -> Sql {
    let mut res = Sql::default();
    res.where_clause.push_str("true");
    if let Some(parent) = &q.parent {
        let idx = res.add_bind(
            first_bind_idx,
            Bind::String(parent.kind.as_str().to_string()),
        );
        res.where_clause
            .push_str(&format!(" AND comment_type = ${idx}"));
        let idx = res.add_bind(first_bind_idx, Bind::Uuid(parent.id));
        res.where_clause
            .push_str(&format!(" AND parent_id = ${idx}"));
    }
    if let Some(user) = &q.user_id {
        let idx = res.add_bind(first_bind_idx, Bind::Uuid(user.0));
        res.where_clause.push_str(&format!(" AND user_id = ${idx}"));
    }
    if let Some(kind) = &q.comment_type {
        let idx = res.add_bind(first_bind_idx, Bind::String(kind.as_str().to_string()));
        res.where_clause
            .push_str(&format!(" AND comment_type = ${idx}"));
    }
    if let Some(after) = q.created_after {
        let idx = res.add_bind(first_bind_idx, Bind::I64(after));
        res.where_clause
            .push_str(&format!(" AND created_time >= ${idx}"));
    }
    res
}

#[cfg(test)]
mod tests {
    use mantic_api::{ContractId, UserId};

    use super::*;

    #[test]
    fn unfiltered_query_binds_nothing() {
        let sql = to_postgres(&CommentQuery::all(), 1);
        assert_eq!(sql.where_clause, "true");
        assert!(sql.binds.is_empty());
    }

    #[test]
    fn parent_scope_binds_kind_and_id() {
        let sql = to_postgres(&CommentQuery::on_contract(ContractId::stub()), 1);
        assert_eq!(
            sql.where_clause,
            "true AND comment_type = $1 AND parent_id = $2",
        );
        assert_eq!(sql.binds.len(), 2);
    }

    #[test]
    fn bind_indices_honor_the_first_bind_offset() {
        let sql = to_postgres(&CommentQuery::user_contract_comments(UserId::stub()), 3);
        assert_eq!(
            sql.where_clause,
            "true AND user_id = $3 AND comment_type = $4",
        );
        assert_eq!(sql.binds.len(), 2);
    }

    #[test]
    fn created_after_adds_an_inclusive_lower_bound() {
        let sql = to_postgres(&CommentQuery::created_after(12345), 1);
        assert_eq!(sql.where_clause, "true AND created_time >= $1");
        assert!(matches!(sql.binds[..], [Bind::I64(12345)]));
    }
}
