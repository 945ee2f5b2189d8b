use futures::future::join;
use futures::FutureExt;

use crate::api::{ClientResult, MenuSource};
use crate::models::{DishDetail, DishId, TextReply};

/// Fetches the dish record and its insight side by side.
///
/// Exactly two reads are issued. Each callback runs as soon as its own read
/// settles, so the page can render the dish while the insight is pending.
pub async fn load_dish<S, D, I>(source: &S, id: &DishId, on_dish: D, on_insight: I)
where
    S: MenuSource,
    D: FnOnce(ClientResult<DishDetail>),
    I: FnOnce(ClientResult<TextReply>),
{
    let dish = source.get_dish(id).map(on_dish);
    let insight = source.get_insight(id).map(on_insight);
    join(dish, insight).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ClientError;
    use crate::models::{DishStatus, MenuItem};
    use futures::executor::block_on;
    use reqwest::StatusCode;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct CountingSource {
        reads: Cell<usize>,
        seen: RefCell<Vec<String>>,
        fail_insight: bool,
    }

    impl MenuSource for CountingSource {
        async fn list_menu(&self) -> ClientResult<Vec<MenuItem>> {
            self.reads.set(self.reads.get() + 1);
            Ok(Vec::new())
        }

        async fn get_dish(&self, id: &DishId) -> ClientResult<DishDetail> {
            self.reads.set(self.reads.get() + 1);
            self.seen.borrow_mut().push(format!("dish:{id}"));
            Ok(DishDetail {
                id: id.clone(),
                name: "Crab Curry".into(),
                category: "Seafood".into(),
                status: DishStatus::Fresh,
                last_checked: Some("45 minutes ago".into()),
            })
        }

        async fn get_insight(&self, id: &DishId) -> ClientResult<TextReply> {
            self.reads.set(self.reads.get() + 1);
            self.seen.borrow_mut().push(format!("insight:{id}"));
            if self.fail_insight {
                return Err(ClientError::EmptyResponse(StatusCode::BAD_GATEWAY));
            }
            Ok(TextReply {
                text: "Crab landed this morning.".into(),
            })
        }
    }

    #[test]
    fn issues_exactly_two_reads_per_load() {
        let source = CountingSource::default();
        let id = DishId::from("crab-curry");

        block_on(load_dish(&source, &id, |_| {}, |_| {}));
        assert_eq!(source.reads.get(), 2);

        let next = DishId::from("clam-soup");
        block_on(load_dish(&source, &next, |_| {}, |_| {}));
        assert_eq!(source.reads.get(), 4);
        assert_eq!(
            *source.seen.borrow(),
            [
                "dish:crab-curry",
                "insight:crab-curry",
                "dish:clam-soup",
                "insight:clam-soup"
            ]
        );
    }

    #[test]
    fn hands_each_result_to_its_own_callback() {
        let source = CountingSource {
            fail_insight: true,
            ..CountingSource::default()
        };
        let dish = RefCell::new(None);
        let insight = RefCell::new(None);

        block_on(load_dish(
            &source,
            &DishId::from(4),
            |result| *dish.borrow_mut() = Some(result),
            |result| *insight.borrow_mut() = Some(result),
        ));

        let dish = dish.into_inner().unwrap().unwrap();
        assert_eq!(dish.id.as_str(), "4");
        assert!(insight.into_inner().unwrap().is_err());
    }
}
