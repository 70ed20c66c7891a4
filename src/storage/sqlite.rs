use crate::model::{StorageError, TaggedPost};
use rusqlite::{Connection, Row, params};

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Создаёт новое хранилище, открывая соединение к БД и выполняя миграции
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;
        Self::init(conn)
    }

    /// Хранилище в памяти; используется в тестах
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS tagged_posts (
                update_id INTEGER PRIMARY KEY,
                chat_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                specialization TEXT,
                score REAL,
                tagged_at TEXT NOT NULL
            );
            ",
        )?;

        Ok(Self { conn })
    }

    /// Проверяет, обрабатывалось ли уже сообщение с этим update_id
    pub fn is_tagged(&self, update_id: i64) -> Result<bool, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM tagged_posts WHERE update_id = ?1")?;
        let mut rows = stmt.query(params![update_id])?;
        Ok(rows.next()?.is_some())
    }

    /// Сохраняет (вставляет или обновляет) результат тегирования
    pub fn save_tag(&self, post: &TaggedPost) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO tagged_posts (
                update_id, chat_id, title, specialization, score, tagged_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                &post.update_id,
                &post.chat_id,
                &post.title,
                &post.specialization,
                &post.score,
                &post.tagged_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Возвращает последний обработанный пост
    pub fn get_last_tagged(&self) -> Result<Option<TaggedPost>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT update_id, chat_id, title, specialization, score, tagged_at
             FROM tagged_posts ORDER BY update_id DESC LIMIT 1",
        )?;

        let mut rows = stmt.query([])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Self::map_post(row)?))
        } else {
            Ok(None)
        }
    }

    /// Количество постов по каждой специализации, по убыванию
    pub fn tag_counts(&self) -> Result<Vec<(String, i64)>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT specialization, COUNT(*) FROM tagged_posts
             WHERE specialization IS NOT NULL
             GROUP BY specialization ORDER BY COUNT(*) DESC, specialization ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let specialization: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            Ok((specialization, count))
        })?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }

        Ok(results)
    }

    fn map_post(row: &Row) -> Result<TaggedPost, rusqlite::Error> {
        let tagged_at_str: String = row.get(5)?;
        let tagged_at = tagged_at_str.parse().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(TaggedPost {
            update_id: row.get(0)?,
            chat_id: row.get(1)?,
            title: row.get(2)?,
            specialization: row.get(3)?,
            score: row.get(4)?,
            tagged_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_post(update_id: i64, specialization: Option<&str>) -> TaggedPost {
        TaggedPost {
            update_id,
            chat_id: -100,
            title: format!("title {update_id}"),
            specialization: specialization.map(str::to_string),
            score: specialization.map(|_| 0.75),
            tagged_at: Utc::now(),
        }
    }

    #[test]
    fn save_and_check_idempotency_flag() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        assert!(!storage.is_tagged(1).unwrap());

        storage.save_tag(&sample_post(1, Some("DevOps"))).unwrap();
        assert!(storage.is_tagged(1).unwrap());

        // Повторное сохранение того же update_id не падает
        storage.save_tag(&sample_post(1, Some("DevOps"))).unwrap();
        assert!(storage.is_tagged(1).unwrap());
    }

    #[test]
    fn last_tagged_round_trip() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        assert!(storage.get_last_tagged().unwrap().is_none());

        storage.save_tag(&sample_post(5, Some("DevOps"))).unwrap();
        storage.save_tag(&sample_post(9, None)).unwrap();

        let last = storage.get_last_tagged().unwrap().unwrap();
        assert_eq!(last.update_id, 9);
        assert_eq!(last.specialization, None);
        assert_eq!(last.score, None);
        assert_eq!(last.title, "title 9");
    }

    #[test]
    fn counts_group_matched_posts_only() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage.save_tag(&sample_post(1, Some("DevOps"))).unwrap();
        storage.save_tag(&sample_post(2, Some("DevOps"))).unwrap();
        storage.save_tag(&sample_post(3, Some("QA ручной"))).unwrap();
        storage.save_tag(&sample_post(4, None)).unwrap();

        let counts = storage.tag_counts().unwrap();
        assert_eq!(counts, vec![("DevOps".to_string(), 2), ("QA ручной".to_string(), 1)]);
    }
}
