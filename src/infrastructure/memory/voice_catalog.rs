//! In-Memory Voice Catalog
//!
//! 按 (模型, 音色 ID) 索引的只读音色表。首次访问时加载一次，
//! 由互斥锁守护并在加锁前后各检查一次，加载完成后不再修改。

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::application::ports::VoiceSourcePort;
use crate::domain::voice::{ModelName, Voice};

/// 单个模型的音色
#[derive(Debug, Default)]
struct ModelVoices {
    /// 保持目录文件中的顺序
    ordered: Vec<Voice>,
    /// 音色 ID -> ordered 下标
    by_id: HashMap<String, usize>,
}

impl ModelVoices {
    fn from_voices(model: &ModelName, voices: Vec<Voice>) -> Self {
        let mut entry = Self::default();
        for voice in voices {
            if entry.by_id.contains_key(voice.id()) {
                tracing::warn!(model = %model, voice_id = %voice.id(), "Duplicate voice id, keeping first");
                continue;
            }
            entry.by_id.insert(voice.id().to_string(), entry.ordered.len());
            entry.ordered.push(voice);
        }
        entry
    }

    fn get(&self, voice_id: &str) -> Option<&Voice> {
        self.by_id.get(voice_id).map(|&i| &self.ordered[i])
    }
}

type CatalogTable = HashMap<ModelName, ModelVoices>;

/// 惰性加载的音色目录
pub struct VoiceCatalog {
    source: Arc<dyn VoiceSourcePort>,
    table: RwLock<Option<Arc<CatalogTable>>>,
    init_lock: Mutex<()>,
}

impl VoiceCatalog {
    pub fn new(source: Arc<dyn VoiceSourcePort>) -> Self {
        Self {
            source,
            table: RwLock::new(None),
            init_lock: Mutex::new(()),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 目录是否已加载
    pub fn is_loaded(&self) -> bool {
        self.loaded_table().is_some()
    }

    /// 立即加载目录（已加载时不做任何事）
    ///
    /// 来源可能做阻塞 I/O，应在异步任务之外调用。
    pub fn preload(&self) {
        self.table();
    }

    /// 某模型的全部音色；模型未知或加载失败时为空
    pub fn voices(&self, model: &ModelName) -> Vec<Voice> {
        self.table()
            .get(model)
            .map(|entry| entry.ordered.clone())
            .unwrap_or_default()
    }

    pub fn get(&self, model: &ModelName, voice_id: &str) -> Option<Voice> {
        self.table()
            .get(model)
            .and_then(|entry| entry.get(voice_id))
            .cloned()
    }

    pub fn contains(&self, model: &ModelName, voice_id: &str) -> bool {
        self.table()
            .get(model)
            .is_some_and(|entry| entry.by_id.contains_key(voice_id))
    }

    /// 成功加载的模型（按名称排序）
    pub fn models(&self) -> Vec<ModelName> {
        let mut models: Vec<ModelName> = self.table().keys().cloned().collect();
        models.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        models
    }

    /// 按名称、语言、描述做大小写不敏感的子串搜索
    ///
    /// `model` 为空时搜索所有模型，结果按模型名、再按目录顺序排列。
    pub fn search(&self, query: &str, model: Option<&ModelName>) -> Vec<Voice> {
        let needle = query.to_lowercase();
        let models = match model {
            Some(m) => vec![m.clone()],
            None => self.models(),
        };

        let table = self.table();
        models
            .iter()
            .filter_map(|m| table.get(m))
            .flat_map(|entry| entry.ordered.iter())
            .filter(|voice| voice.matches(&needle))
            .cloned()
            .collect()
    }

    fn loaded_table(&self) -> Option<Arc<CatalogTable>> {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn table(&self) -> Arc<CatalogTable> {
        if let Some(table) = self.loaded_table() {
            return table;
        }

        let _guard = self.init_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = self.loaded_table() {
            return table;
        }

        let table = Arc::new(self.load_all());
        *self.table.write().unwrap_or_else(PoisonError::into_inner) = Some(table.clone());
        table
    }

    fn load_all(&self) -> CatalogTable {
        let mut table = CatalogTable::new();

        for model in self.source.models() {
            match self.source.load(&model) {
                Ok(voices) => {
                    let entry = ModelVoices::from_voices(&model, voices);
                    tracing::debug!(model = %model, count = entry.ordered.len(), "Voice catalog loaded");
                    table.insert(model, entry);
                }
                Err(e) => {
                    tracing::warn!(model = %model, error = %e, "Failed to load voice catalog, model unavailable");
                }
            }
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::CatalogError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 统计加载次数，ex 模型加载失败
    struct CountingSource {
        loads: AtomicUsize,
    }

    impl VoiceSourcePort for CountingSource {
        fn models(&self) -> Vec<ModelName> {
            ModelName::builtin()
        }

        fn load(&self, model: &ModelName) -> Result<Vec<Voice>, CatalogError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(5));
            if model.as_str() == ModelName::EX {
                return Err(CatalogError::Corrupt {
                    model: model.to_string(),
                    reason: "truncated".to_string(),
                });
            }
            Ok(vec![
                Voice::new("v-b", "Beta", "en").with_description("Calm narrator"),
                Voice::new("v-a", "Alpha", "zh"),
                Voice::new("v-b", "Duplicate", "en"),
            ])
        }
    }

    fn catalog() -> (Arc<CountingSource>, VoiceCatalog) {
        let source = Arc::new(CountingSource {
            loads: AtomicUsize::new(0),
        });
        let catalog = VoiceCatalog::new(source.clone());
        (source, catalog)
    }

    #[test]
    fn test_lazy_load() {
        let (source, catalog) = catalog();
        assert!(!catalog.is_loaded());
        assert_eq!(source.loads.load(Ordering::SeqCst), 0);

        assert!(catalog.contains(&ModelName::turbo(), "v-a"));
        assert!(catalog.is_loaded());
    }

    #[test]
    fn test_preload_loads_once() {
        let (source, catalog) = catalog();
        catalog.preload();
        assert!(catalog.is_loaded());
        assert_eq!(source.loads.load(Ordering::SeqCst), 2);

        catalog.preload();
        assert_eq!(catalog.voices(&ModelName::turbo()).len(), 2);
        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_first_access_loads_once() {
        let (source, catalog) = catalog();
        let catalog = Arc::new(catalog);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let catalog = catalog.clone();
                std::thread::spawn(move || catalog.voices(&ModelName::turbo()).len())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 2);
        }
        // 每个模型各加载一次
        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_order_preserved_and_duplicates_dropped() {
        let (_, catalog) = catalog();
        let voices = catalog.voices(&ModelName::turbo());
        let ids: Vec<&str> = voices.iter().map(|v| v.id()).collect();
        assert_eq!(ids, vec!["v-b", "v-a"]);
        assert_eq!(catalog.get(&ModelName::turbo(), "v-b").unwrap().name(), "Beta");
    }

    #[test]
    fn test_failed_model_degrades_to_empty() {
        let (_, catalog) = catalog();
        assert!(catalog.voices(&ModelName::ex()).is_empty());
        assert!(!catalog.contains(&ModelName::ex(), "v-a"));
        assert_eq!(catalog.models(), vec![ModelName::turbo()]);
    }

    #[test]
    fn test_search() {
        let (_, catalog) = catalog();
        let results = catalog.search("NARR", None);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id(), "v-b");

        assert!(catalog.search("alpha", Some(&ModelName::ex())).is_empty());
    }
}
