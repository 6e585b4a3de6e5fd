//! 故事数据访问层
//!
//! 提供故事记录的 CRUD 操作，包括：
//! - 创建故事（与主题计数更新在同一事务内提交）
//! - 获取、分页列表、最近列表
//! - 编辑（仅 title 与 user_notes）、删除

use chrono::Utc;
use rusqlite::{params, Connection, Row};

use crate::database::dao::theme_dao::ThemeDao;
use crate::errors::StoryError;
use crate::models::story_model::{NewStory, Story, StoryPage};

/// 列表页固定大小
pub const PAGE_SIZE: u32 = 10;

/// 故事 DAO
pub struct StoryDao;

impl StoryDao {
    // ------------------------------------------------------------------------
    // 创建故事
    // ------------------------------------------------------------------------

    /// 插入故事并更新主题计数，两者在同一事务内提交
    ///
    /// 主题按小写名称精确匹配：命中则 popularity_score + 1，
    /// 未命中则以 `user_generated` 分类新建一条记录（分数为 1）。
    /// 任一写入失败时整个事务回滚，不会出现只保存了故事而计数
    /// 未更新的中间状态。
    pub fn insert_with_theme(conn: &mut Connection, new: &NewStory) -> Result<Story, StoryError> {
        let created_at = Utc::now().timestamp();
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO stories (
                title, content, theme, age_group, child_name, story_length,
                created_at, user_notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, NULL)",
            params![
                new.title,
                new.content,
                new.theme,
                new.age_group,
                new.child_name,
                new.story_length,
                created_at,
            ],
        )?;
        let id = tx.last_insert_rowid();

        ThemeDao::bump_or_insert(&tx, &new.theme)?;

        tx.commit()?;

        Ok(Story {
            id,
            title: new.title.clone(),
            content: new.content.clone(),
            theme: new.theme.clone(),
            age_group: new.age_group.clone(),
            child_name: new.child_name.clone(),
            story_length: new.story_length.clone(),
            created_at,
            user_notes: None,
        })
    }

    // ------------------------------------------------------------------------
    // 查询故事
    // ------------------------------------------------------------------------

    /// 按 id 获取单个故事
    pub fn get(conn: &Connection, id: i64) -> Result<Option<Story>, StoryError> {
        let mut stmt = conn.prepare(
            "SELECT id, title, content, theme, age_group, child_name, story_length,
                    created_at, user_notes
             FROM stories WHERE id = ?",
        )?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Self::map_row(row)?))
        } else {
            Ok(None)
        }
    }

    /// 分页列出故事，最新的在前
    ///
    /// 页码从 1 开始；越界页返回空列表而不是错误。
    pub fn list_page(conn: &Connection, page: u32) -> Result<StoryPage, StoryError> {
        let page = page.max(1);
        let total: i64 = conn.query_row("SELECT COUNT(*) FROM stories", [], |row| row.get(0))?;
        let pages = (total as u64).div_ceil(PAGE_SIZE as u64) as u32;
        let offset = (page - 1) as i64 * PAGE_SIZE as i64;

        let mut stmt = conn.prepare(
            "SELECT id, title, content, theme, age_group, child_name, story_length,
                    created_at, user_notes
             FROM stories
             ORDER BY created_at DESC, id DESC
             LIMIT ?1 OFFSET ?2",
        )?;

        let stories = stmt
            .query_map(params![PAGE_SIZE, offset], |row| Self::map_row(row))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StoryPage {
            stories,
            page,
            per_page: PAGE_SIZE,
            total,
            pages,
        })
    }

    /// 最近创建的 `limit` 个故事（首页展示用）
    pub fn recent(conn: &Connection, limit: u32) -> Result<Vec<Story>, StoryError> {
        let mut stmt = conn.prepare(
            "SELECT id, title, content, theme, age_group, child_name, story_length,
                    created_at, user_notes
             FROM stories
             ORDER BY created_at DESC, id DESC
             LIMIT ?",
        )?;

        let stories = stmt
            .query_map([limit], |row| Self::map_row(row))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(stories)
    }

    // ------------------------------------------------------------------------
    // 编辑 / 删除
    // ------------------------------------------------------------------------

    /// 更新可编辑字段（仅 title 与 user_notes，其余字段不可通过此路径修改）
    pub fn update_editable(
        conn: &Connection,
        id: i64,
        title: &str,
        user_notes: &str,
    ) -> Result<(), StoryError> {
        let affected = conn.execute(
            "UPDATE stories SET title = ?1, user_notes = ?2 WHERE id = ?3",
            params![title, user_notes, id],
        )?;

        if affected == 0 {
            return Err(StoryError::NotFound(id));
        }
        Ok(())
    }

    /// 删除故事，id 不存在时返回 NotFound（重复删除不是 no-op）
    pub fn delete(conn: &Connection, id: i64) -> Result<(), StoryError> {
        let affected = conn.execute("DELETE FROM stories WHERE id = ?", [id])?;

        if affected == 0 {
            return Err(StoryError::NotFound(id));
        }
        Ok(())
    }

    fn map_row(row: &Row) -> rusqlite::Result<Story> {
        Ok(Story {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            theme: row.get(3)?,
            age_group: row.get(4)?,
            child_name: row.get(5)?,
            story_length: row.get(6)?,
            created_at: row.get(7)?,
            user_notes: row.get(8)?,
        })
    }
}
